pub mod grain_dispatch;
