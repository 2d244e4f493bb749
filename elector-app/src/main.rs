#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    elector_app_lib::run()
}
