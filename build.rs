// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("pantry")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Pantry Contributors")
        .about("Prints recipes that can be made from the ingredients you provide")
        .arg(
            Arg::new("db_path")
                .required(true)
                .env("PANTRY_DB")
                .value_name("DB_PATH")
                .help("Path to the recipe database"),
        )
        .arg(
            Arg::new("ingredients")
                .long("ingredients")
                .value_name("LIST")
                .help("Comma separated ingredients every recipe must use (e.g. milk,sugar)"),
        )
        .arg(
            Arg::new("meals")
                .long("meals")
                .value_name("LIST")
                .help("Comma separated meal times (e.g. breakfast,brunch)"),
        )
        .arg(
            Arg::new("details")
                .long("details")
                .action(ArgAction::SetTrue)
                .help("Print each matching recipe with its meals and ingredient lines"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("pantry.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
