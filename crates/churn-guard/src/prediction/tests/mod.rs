mod classifier;
mod common;
