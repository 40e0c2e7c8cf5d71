pub mod create;
pub mod export;
pub mod issues;
pub mod serve;
pub mod snapshot;
pub mod teams;
pub mod viewer;
