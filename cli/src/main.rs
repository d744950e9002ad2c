//! gatekeep CLI: try a rule set against a cart from the command line.
//!
//! Subcommands:
//! - `eval <config> --cart <file> [--gateways a,b] [--rates a,b] [--trace]`: filter candidates
//! - `check <config>`: validate config loads without errors
//!
//! Set `RUST_LOG=gatekeep=debug` to see per-rule decisions on stderr.

use std::path::Path;
use std::process;

use gatekeep::prelude::*;
use gatekeep::RuleTrace;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "eval" => cmd_eval(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_eval(args: &[String]) -> Result<(), String> {
    let args = EvalArgs::parse(args)?;

    let rulebook = Rulebook::load(&args.config).map_err(|e| format!("config load failed: {e}"))?;
    let cart = load_cart(&args.cart)?;
    tracing::debug!(config = %args.config, cart = %args.cart, "loaded rulebook and cart");

    let gateways = args.gateways.iter().map(PaymentGateway::new).collect();
    let rates = args.rates.iter().map(ShippingRate::new).collect();

    if args.trace {
        let gateways = rulebook.payment_gateways.run_with_trace(&cart, gateways);
        let rates = rulebook.shipping_rates.run_with_trace(&cart, rates);
        print_list("Payment gateways", &gateways.result);
        print_list("Shipping rates", &rates.result);
        print_trace(gateways.rules.iter().chain(&rates.rules));
    } else {
        print_list(
            "Payment gateways",
            &rulebook.filter_payment_gateways(&cart, gateways),
        );
        print_list("Shipping rates", &rulebook.filter_shipping_rates(&cart, rates));
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let [config_path] = args else {
        return Err("check requires a config file path".into());
    };

    let rulebook = Rulebook::load(config_path).map_err(|e| format!("config invalid: {e}"))?;

    println!(
        "Config valid: {} payment gateway campaign(s), {} shipping rate campaign(s)",
        rulebook.payment_gateways.len(),
        rulebook.shipping_rates.len()
    );
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════════

fn print_list<C: Candidate>(heading: &str, candidates: &[C]) {
    println!("{heading}:");
    if candidates.is_empty() {
        println!("  (none)");
    }
    for candidate in candidates {
        println!("  {}", candidate.name());
    }
}

fn print_trace<'a>(rules: impl Iterator<Item = &'a RuleTrace>) {
    println!("Trace:");
    for rule in rules {
        println!("  {rule}");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Cart loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_cart(path: &str) -> Result<Cart, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("cart JSON parse error: {e}"))
    } else {
        serde_yaml::from_str(&content).map_err(|e| format!("cart YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, PartialEq, Eq)]
struct EvalArgs {
    config: String,
    cart: String,
    gateways: Vec<String>,
    rates: Vec<String>,
    trace: bool,
}

impl EvalArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let Some((config, rest)) = args.split_first() else {
            return Err("eval requires a config file path".into());
        };

        let mut parsed = Self {
            config: config.clone(),
            ..Self::default()
        };
        let mut cart = None;
        let mut iter = rest.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--cart" => cart = Some(flag_value(&mut iter, "--cart")?.to_owned()),
                "--gateways" => parsed.gateways = split_list(flag_value(&mut iter, "--gateways")?),
                "--rates" => parsed.rates = split_list(flag_value(&mut iter, "--rates")?),
                "--trace" => parsed.trace = true,
                other => return Err(format!("unexpected argument \"{other}\"")),
            }
        }

        parsed.cart = cart.ok_or("eval requires --cart <file>")?;
        Ok(parsed)
    }
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

/// Split a comma-separated list. Names are kept as written apart from
/// surrounding whitespace; empty entries are dropped.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn print_usage() {
    eprintln!(
        "Usage: gatekeep <command> [options]

Commands:
  eval <config> --cart <file> [options]   Filter gateways and rates for a cart
      --gateways a,b,...                  Payment gateway names to offer
      --rates a,b,...                     Shipping rate names to offer
      --trace                             Print each rule's decision
  check <config>                          Validate config
  help                                    Show this help

Config and cart files are read as JSON when the extension is .json, YAML otherwise."
    );
}
