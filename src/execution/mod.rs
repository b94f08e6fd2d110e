mod parallel_reduce;

pub use parallel_reduce::ParallelReduce;
