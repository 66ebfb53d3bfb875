use serde::Serialize;

use crate::cmd::{VersionArgs, VersionFormat};
use crate::exit::{CliError, CliResult, INTERNAL, SUCCESS};

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<BuildInfo>,
}

#[derive(Serialize)]
struct BuildInfo {
    target: &'static str,
    profile: &'static str,
    target_os: &'static str,
    target_arch: &'static str,
    rustc: &'static str,
    git_hash: &'static str,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            target: option_env!("MIDIPORT_BUILD_TARGET").unwrap_or("unknown"),
            profile: option_env!("MIDIPORT_BUILD_PROFILE").unwrap_or("unknown"),
            target_os: std::env::consts::OS,
            target_arch: std::env::consts::ARCH,
            rustc: option_env!("RUSTC_VERSION").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

pub fn run(args: VersionArgs) -> CliResult<i32> {
    let info = VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        build: args.extended.then(BuildInfo::current),
    };

    match args.format {
        VersionFormat::Json => {
            let json = serde_json::to_string(&info)
                .map_err(|err| CliError::new(INTERNAL, format!("version encoding failed: {err}")))?;
            println!("{json}");
        }
        VersionFormat::Text => print_text(&info),
    }

    Ok(SUCCESS)
}

fn print_text(info: &VersionInfo) {
    let Some(build) = &info.build else {
        println!("{} {}", info.name, info.version);
        return;
    };

    println!("name: {}", info.name);
    println!("version: {}", info.version);
    println!("target: {}", build.target);
    println!("profile: {}", build.profile);
    println!("target_os: {}", build.target_os);
    println!("target_arch: {}", build.target_arch);
    println!("rustc: {}", build.rustc);
    println!("git_hash: {}", build.git_hash);
}
