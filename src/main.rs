mod app;
mod audio;
mod config;
mod counter;
mod journal;
mod library;
mod mpris;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
