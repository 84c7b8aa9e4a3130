pub mod train_config;
pub mod train_stats;
pub mod trainer;

pub use train_config::TrainConfig;
pub use train_stats::TrainStats;
