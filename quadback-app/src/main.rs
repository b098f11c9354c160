mod app;

use std::path::PathBuf;

use app::App;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config_path = None;
    let mut respond = false;
    let mut fast = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--respond" => respond = true,
            "--fast" => fast = true,
            "--help" | "-h" => {
                println!("usage: quadback [--respond] [--fast] [CONFIG_PATH]");
                println!("  --respond  simulate a perfect participant");
                println!("  --fast     skip inter-trial pacing");
                return Ok(());
            }
            other => config_path = Some(PathBuf::from(other)),
        }
    }
    let path = config_path.unwrap_or_else(quadback_store::default_config_path);

    App::new(path, respond, fast).run()
}
