//! Fan-out of independent row tasks onto an optional thread pool.


use rayon::prelude::*;
use rayon::ThreadPool;

/// Runs `f(index, task)` once for every task and returns after all of them
/// have finished.
///
/// With a pool the tasks run concurrently inside it, in no particular order.
/// Without one they run in order on the calling thread. Both ways call the
/// same closure, so results do not depend on the choice as long as each task
/// only writes memory it owns, which the `Send` bound on owned `&mut` rows
/// guarantees.
pub fn run_on_pool<T, F>(pool: Option<&ThreadPool>, tasks: Vec<T>, label: &str, f: F)
where
    T: Send,
    F: Fn(usize, T) + Sync + Send,
{
    log::trace!(
        "{}: {} tasks on {}",
        label,
        tasks.len(),
        pool.map_or_else(
            || "the calling thread".to_owned(),
            |p| format!("{} threads", p.current_num_threads())
        )
    );

    match pool {
        Some(pool) => pool.install(|| {
            tasks
                .into_par_iter()
                .enumerate()
                .for_each(|(index, task)| f(index, task));
        }),
        None => {
            for (index, task) in tasks.into_iter().enumerate() {
                f(index, task);
            }
        }
    }
}
