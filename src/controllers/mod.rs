pub mod dispatch_controller;
