pub mod dispatch;
pub mod fill_all;
pub mod move_files;
pub mod plan;
pub mod reduce_all;
pub mod reduce_region;
pub mod reduce_session;
pub mod shared;
