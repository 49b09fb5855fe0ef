pub mod return_controller;
