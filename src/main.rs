use anyhow::bail;
use clap::{Parser, Subcommand};
use serde::Serialize;

use jgloss_www::forward::{
    escape_url, extract_flags, is_wellformed_payload, to_base_url, to_jgloss_url, unescape_url,
};
use jgloss_www::utils::{log, set_global_log_level, LogLevel};

#[derive(Parser)]
#[command(name = "jgloss-www", about = "Convert URLs to and from the forwarding servlet format")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build a forwarding URL for a target URL
    Encode {
        /// The target URL to embed
        url: String,

        /// URL of the forwarding servlet
        #[arg(long)]
        servlet: String,

        /// Ask the servlet to forward cookies
        #[arg(long)]
        forward_cookies: bool,

        /// Ask the servlet to forward form data
        #[arg(long)]
        forward_form_data: bool,
    },

    /// Recover the target URL and flags from a forwarding URL
    Decode {
        /// The forwarding URL
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Escape a string into the payload alphabet
    Escape { text: String },

    /// Unescape a payload back into the original string
    Unescape { text: String },
}

#[derive(Serialize)]
struct DecodedUrl {
    url: String,
    forward_cookies: bool,
    forward_form_data: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        set_global_log_level(LogLevel::Debug);
    }

    match cli.command {
        Command::Encode {
            url,
            servlet,
            forward_cookies,
            forward_form_data,
        } => {
            let out = to_jgloss_url(&url, &servlet, forward_cookies, forward_form_data)?;
            println!("{}", out);
        }
        Command::Decode { url, json } => decode(&url, json)?,
        Command::Escape { text } => println!("{}", escape_url(&text)?),
        Command::Unescape { text } => println!("{}", unescape_url(&text)),
    }

    Ok(())
}

fn decode(url: &str, json: bool) -> anyhow::Result<()> {
    let payload = url.rsplit('/').next().unwrap_or(url);
    if !is_wellformed_payload(payload) {
        log::warn("decode", "payload contains characters outside the wire alphabet");
    }

    let Some(base_url) = to_base_url(url) else {
        bail!("not a forwarding URL: no '/' separator in {url}");
    };
    let flags = extract_flags(url);

    if json {
        let decoded = DecodedUrl {
            url: base_url,
            forward_cookies: flags.is_some_and(|f| f.forward_cookies),
            forward_form_data: flags.is_some_and(|f| f.forward_form_data),
        };
        println!("{}", serde_json::to_string_pretty(&decoded)?);
        return Ok(());
    }

    println!("{}", base_url);
    match flags {
        Some(flags) => {
            println!("forward cookies:   {}", flags.forward_cookies);
            println!("forward form data: {}", flags.forward_form_data);
        }
        None => log::warn("decode", "URL too short to carry forwarding flags"),
    }

    Ok(())
}
