const DEFAULT_PROGRAM: &str = include_str!("../../../assets/programs/print8.ls8");

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => {
            log::info!("running program '{}'", path);
            match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    eprintln!("Failed to read '{}': {}", path, err);
                    std::process::exit(1);
                }
            }
        }
        None => {
            log::info!("no program path provided, running bundled print8");
            DEFAULT_PROGRAM.to_string()
        }
    };

    if let Err(err) = ls8::run(&source) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
