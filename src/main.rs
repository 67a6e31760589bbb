mod app;
mod audio;
mod config;
mod error;
mod library;
mod mpris;
mod playlist;
mod runtime;
mod session;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
