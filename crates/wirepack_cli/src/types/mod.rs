pub mod build_mode;
