use std::num::NonZeroUsize;

use bon::Builder;
use parking_lot::Mutex;
use rayon::iter::{ParallelBridge as _, ParallelIterator as _};

#[derive(Copy, Clone, Debug, Default)]
pub enum WorkerCount {
    #[default]
    Auto,
    Manual(NonZeroUsize),
}

impl WorkerCount {
    pub fn get(self) -> usize {
        match self {
            WorkerCount::Auto => num_cpus::get(),
            WorkerCount::Manual(num) => num.get(),
        }
    }
}

/// Something that can run independent work items in parallel.
///
/// `for_each` is fork-join: it returns only after the worker function
/// finished for every item. Items may be processed in any order.
pub trait Executor: Sync {
    /// How many items can be processed at the same time.
    fn worker_count(&self) -> usize;

    fn for_each<It, F>(&self, items: It, worker_fun: F)
    where
        It: Iterator + Send,
        It::Item: Send,
        F: Fn(It::Item) + Sync + Send;
}

/// Runs everything in the calling thread.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sequential;

impl Executor for Sequential {
    fn worker_count(&self) -> usize {
        1
    }

    fn for_each<It, F>(&self, items: It, worker_fun: F)
    where
        It: Iterator + Send,
        It::Item: Send,
        F: Fn(It::Item) + Sync + Send,
    {
        items.for_each(worker_fun)
    }
}

/// Spawns a fixed number of scoped worker threads for every `for_each` call.
/// Workers pull items one by one from the shared iterator.
#[derive(Copy, Clone, Debug, Default, Builder)]
pub struct ThreadPool {
    #[builder(default)]
    worker_count: WorkerCount,
}

impl Executor for ThreadPool {
    fn worker_count(&self) -> usize {
        self.worker_count.get()
    }

    /// Panics in the worker function are propagated to the caller once all
    /// workers have stopped.
    fn for_each<It, F>(&self, items: It, worker_fun: F)
    where
        It: Iterator + Send,
        It::Item: Send,
        F: Fn(It::Item) + Sync + Send,
    {
        let worker_count = self.worker_count();
        if worker_count == 1 {
            items.for_each(worker_fun);
            return;
        }

        let items = Mutex::new(SharedItems {
            iterator: Some(items),
        });

        // References that can safely be moved into the thread
        let items = &items;
        let worker_fun = &worker_fun;

        let result = crossbeam_utils::thread::scope(|scope| {
            for worker_id in 0..worker_count {
                scope.spawn(move |_| {
                    // Stop all other threads if we're panicking out of the loop
                    scopeguard::defer_on_unwind! {
                        items.lock().stop();
                    }
                    log::trace!("Worker {worker_id} started");

                    let mut processed = 0usize;
                    loop {
                        // The lock must be released before the worker function runs
                        let item = items.lock().next();
                        let Some(item) = item else {
                            break;
                        };
                        worker_fun(item);
                        processed += 1;
                    }

                    log::trace!("Worker {worker_id} finished after {processed} items");
                });
            }
        });

        if let Err(panic) = result {
            std::panic::resume_unwind(panic);
        }
    }
}

struct SharedItems<It> {
    iterator: Option<It>,
}

impl<It: Iterator> SharedItems<It> {
    /// Behaves like iterator next, but stays exhausted after the first None
    fn next(&mut self) -> Option<It::Item> {
        let iterator = self.iterator.as_mut()?;
        let item = iterator.next();
        if item.is_none() {
            self.stop();
        }
        item
    }

    fn stop(&mut self) {
        self.iterator = None
    }
}

/// Delegates to the global rayon thread pool.
#[derive(Copy, Clone, Debug, Default)]
pub struct Rayon;

impl Executor for Rayon {
    fn worker_count(&self) -> usize {
        rayon::current_num_threads()
    }

    fn for_each<It, F>(&self, items: It, worker_fun: F)
    where
        It: Iterator + Send,
        It::Item: Send,
        F: Fn(It::Item) + Sync + Send,
    {
        items.par_bridge().for_each(worker_fun)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert2::assert;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
    use test_strategy::proptest;

    fn worker_count_strategy() -> impl Strategy<Value = WorkerCount> {
        prop_oneof![
            (1..32usize).prop_map(|n| WorkerCount::Manual(NonZeroUsize::new(n).unwrap())),
            Just(WorkerCount::Auto),
        ]
    }

    fn pool(worker_count: usize) -> ThreadPool {
        ThreadPool::builder()
            .worker_count(WorkerCount::Manual(NonZeroUsize::new(worker_count).unwrap()))
            .build()
    }

    /// Sums a range using the thread pool, checks that sum is as expected
    #[proptest]
    fn sum(#[strategy(worker_count_strategy())] worker_count: WorkerCount, #[strategy(0..1000u32)] n: u32) {
        let sum = AtomicU32::new(0);
        let pool = ThreadPool::builder().worker_count(worker_count).build();

        pool.for_each(0..n, |i| {
            sum.fetch_add(i, Ordering::Relaxed);
        });

        assert!(sum.load(Ordering::Relaxed) == if n > 0 { n * (n - 1) / 2 } else { 0 });
    }

    #[proptest]
    fn every_item_exactly_once(#[strategy(1..16usize)] worker_count: usize, #[strategy(0..500usize)] n: usize) {
        let counts: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();

        pool(worker_count).for_each(0..n, |i| {
            counts[i].fetch_add(1, Ordering::Relaxed);
        });

        assert!(counts.iter().all(|c| c.load(Ordering::Relaxed) == 1));
    }

    /// Checks that the jobs are actually running in different threads by
    /// blocking until all workers have picked up an item.
    #[proptest(cases = 16)]
    fn actual_threads(#[strategy(1..10usize)] worker_count: usize) {
        let count_waiting = std::sync::Mutex::new(0usize);
        let cond = std::sync::Condvar::new();
        let end = std::time::Instant::now() + std::time::Duration::from_secs(2);

        pool(worker_count).for_each(0..worker_count, |_i| {
            let mut count_waiting = count_waiting.lock().unwrap();
            *count_waiting += 1;
            cond.notify_all();
            while *count_waiting < worker_count {
                let timeout = end
                    .checked_duration_since(std::time::Instant::now())
                    .expect("Timed out waiting for other workers");
                count_waiting = cond.wait_timeout(count_waiting, timeout).unwrap().0;
            }
        });

        assert!(*count_waiting.lock().unwrap() == worker_count);
    }

    #[test]
    #[should_panic]
    fn propagates_panics() {
        pool(4).for_each(0..100, |i| {
            if i == 50 {
                panic!("Don't panic!");
            }
        });
    }

    #[test]
    fn single_worker_runs_in_calling_thread() {
        let caller = std::thread::current().id();
        pool(1).for_each(0..10, |_i| {
            assert!(std::thread::current().id() == caller);
        });
    }

    #[test]
    fn sequential_keeps_order() {
        let seen = std::sync::Mutex::new(Vec::new());
        Sequential.for_each(0..5, |i| seen.lock().unwrap().push(i));
        assert!(*seen.lock().unwrap() == vec![0, 1, 2, 3, 4]);
        assert!(Sequential.worker_count() == 1);
    }

    #[test]
    fn rayon_processes_everything() {
        let sum = AtomicU32::new(0);
        Rayon.for_each(1..=100u32, |i| {
            sum.fetch_add(i, Ordering::Relaxed);
        });
        assert!(sum.load(Ordering::Relaxed) == 5050);
        assert!(Rayon.worker_count() >= 1);
    }

    #[test]
    fn default_worker_count_is_auto() {
        assert!(ThreadPool::builder().build().worker_count() == num_cpus::get());
    }
}
