pub mod artifact;
pub mod chain;
pub mod contracts;
pub mod deployer;
pub mod drosera;
pub mod error;
pub mod output;
pub mod probe;
pub mod record;
pub mod shared;
