pub mod change_detector;
