use std::io::{self, BufRead, Read, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use shamir_p257::selftest::{self, DEFAULT_SHARE_COUNT, DEFAULT_THRESHOLD};
use shamir_p257::{recover, split_secret, Secret, SecretDigest, Share, ShareParameters};

/// Split a 32-byte secret into shares, or recover it from them.
///
/// Any `threshold` of the `shares` recover the secret. Recovering from
/// fewer shares returns a wrong secret without an error, unless the
/// split was written with `--json` and carries a digest to check against.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a secret and print one share per line.
    ///
    /// The secret (64 hex characters) is read from stdin, never from the
    /// command line, so it stays out of shell history and `ps`.
    Split {
        /// Minimum number of shares needed to recover (>= 2).
        #[arg(short, long)]
        threshold: usize,
        /// Number of shares to produce (>= 3).
        #[arg(short = 'n', long)]
        shares: usize,
        /// Print a JSON bundle with a digest of the secret.
        #[arg(long)]
        json: bool,
    },
    /// Read shares from stdin until EOF and print the secret in hex.
    Recover {
        /// Expect the JSON bundle written by `split --json`.
        #[arg(long)]
        json: bool,
    },
    /// Split and recover a fixed sample key.
    Test {
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: usize,
        #[arg(short = 'n', long, default_value_t = DEFAULT_SHARE_COUNT)]
        shares: usize,
    },
}

#[derive(Serialize, Deserialize)]
struct ShareBundle {
    threshold: usize,
    shares: Vec<Share>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    digest: Option<SecretDigest>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Split {
            threshold,
            shares,
            json,
        } => run_split(threshold, shares, json),
        Command::Recover { json } => run_recover(json),
        Command::Test { threshold, shares } => run_test(threshold, shares),
    }
}

fn run_split(threshold: usize, share_count: usize, json: bool) -> Result<()> {
    let params = ShareParameters::new(threshold, share_count)?;
    let secret_hex = Zeroizing::new(prompt_secret()?);
    let secret_bytes = Zeroizing::new(
        hex::decode(secret_hex.trim()).context("secret is not valid hex")?,
    );
    let secret = Secret::from_slice(&secret_bytes)?;

    let shares = split_secret(&secret, params)?;

    if json {
        let bundle = ShareBundle {
            threshold,
            shares,
            digest: Some(SecretDigest::commit(&secret)?),
        };
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        for share in &shares {
            println!("{}", share);
        }
    }
    Ok(())
}

fn prompt_secret() -> Result<String> {
    eprint!("Secret (64 hex characters): ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read secret from stdin")?;
    Ok(line)
}

fn run_recover(json: bool) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read shares from stdin")?;

    let (shares, digest) = if json {
        let bundle: ShareBundle =
            serde_json::from_str(&input).context("input is not a share bundle")?;
        if bundle.shares.len() < bundle.threshold {
            eprintln!(
                "warning: {} shares given, split used threshold {}; the result will be wrong",
                bundle.shares.len(),
                bundle.threshold
            );
        }
        (bundle.shares, bundle.digest)
    } else {
        (parse_share_lines(&input)?, None)
    };

    let secret = recover(&shares)?;
    if let Some(digest) = digest {
        if !digest.verify(&secret) {
            bail!("recovered secret does not match the stored digest");
        }
    }
    println!("{}", hex::encode(secret.as_bytes()));
    Ok(())
}

/// One share per line; blank lines and `#` comments are skipped.
fn parse_share_lines(input: &str) -> Result<Vec<Share>> {
    input
        .lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| {
            line.parse::<Share>()
                .with_context(|| format!("line {}", n))
        })
        .collect()
}

fn run_test(threshold: usize, share_count: usize) -> Result<()> {
    let report = selftest::run(threshold, share_count)?;

    println!(
        "Split sample key into {} shares, threshold {}",
        report.params.share_count(),
        report.params.threshold()
    );
    for share in &report.shares {
        println!("\t{}", share);
    }
    println!("Recovered using shares {:?}", report.used);

    if !report.recovered_matches {
        bail!("self-test failed: recovered key differs from the sample key");
    }
    println!("Self-test passed");
    Ok(())
}
