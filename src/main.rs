use std::{
    env,
    io::{self, BufRead, Write},
};

use log::{info, warn};

use logreg_orchestra::{Config, Session, report::Report};

const MENU: &str = "
========= MAIN MENU =========
1. Load dataset
2. Train model
3. Evaluate accuracy
4. Quit";

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            Config::load(&path)?
        }
        None => Config::default(),
    };

    let report = Report::create(&config.report_path)?;
    info!("reporting to {}", config.report_path.display());
    let mut session = Session::new(config, report);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{MENU}");
        print!("Choose an option: ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            info!("stdin closed, exiting");
            break;
        };

        match line.trim() {
            "1" => match session.load_dataset() {
                Ok(rows) => println!("Dataset loaded: {rows} samples."),
                Err(e) => println!("Failed to load the dataset: {e}"),
            },
            "2" => match session.train() {
                Ok(elapsed) => println!("Model trained in {elapsed:?}."),
                Err(e) => println!("Failed to train: {e}"),
            },
            "3" => match session.evaluate() {
                Ok(accuracy) => println!("Model accuracy: {:.2}%", accuracy * 100.),
                Err(e) => println!("Failed to evaluate: {e}"),
            },
            "4" => {
                println!("Bye.");
                break;
            }
            other => {
                warn!("unknown menu option {other:?}");
                println!("Invalid option.");
            }
        }
    }

    Ok(())
}
