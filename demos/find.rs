use findcfg::{options, Finder};

fn main() -> Result<(), findcfg::Error> {
    let finder = Finder::builder()
        .with(options::exact_path_env("FINDCFG_DEMO_CONFIG"))
        .with(options::toml())
        .with(options::yaml())
        .with(options::names(&["findcfg", "config"]))
        .with(options::current_dir(&[]))
        .with(options::user_config_dir(&["findcfg"]))
        .with(options::home_dir(&[".config", "findcfg"]))
        .with(options::executable_dir(&[]));

    println!("Search order:");
    for candidate in finder.candidates() {
        println!("  [{}] {}", candidate.dir_desc, candidate.path.display());
    }

    let found = finder.find_required()?;
    println!("Found: {} ({}, via {})", found.path.display(), found.ext, found.dir_desc);

    Ok(())
}
