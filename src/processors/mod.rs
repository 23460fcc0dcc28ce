//! File processors built on the batch translator

pub mod dataset;
