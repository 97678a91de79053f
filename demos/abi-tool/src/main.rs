//! Contract ABI command-line tool
//!
//! Run with:
//!   abi-tool selector "getMembers()"
//!   abi-tool encode "initMemberUrl(address,string)" 0xa94f...bf0b tcp://192.168.1.1:8080
//!   abi-tool decode uint64,uint64,uint64 0x...07d0...07d0...1388

use clap::{Parser, Subcommand};
use contract_abi::{selector, AbiContext, Address, Function, ParamType, Value};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "abi-tool")]
#[command(about = "Encode, decode and hash contract calls")]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the 4-byte selector of a signature
    Selector {
        /// Canonical signature, e.g. `initMembers(address[])`
        signature: String,
    },
    /// Encode a call
    Encode {
        /// Signature declaring the argument types
        signature: String,
        /// One value per declared argument
        args: Vec<String>,
        /// Print only the encoded arguments
        #[arg(long)]
        no_selector: bool,
    },
    /// Decode a result buffer
    Decode {
        /// Comma-separated types, e.g. `address,string`
        types: String,
        /// Hex-encoded buffer
        data: String,
        /// Read out-of-range string offsets as address text
        #[arg(long)]
        legacy: bool,
    },
}

/// Parse a command-line argument as a value of type `ty`
fn parse_value(ty: ParamType, arg: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let value = match ty {
        ParamType::Uint64 => Value::Uint64(arg.parse()?),
        ParamType::Address => Value::Address(arg.parse()?),
        ParamType::Bool => Value::Bool(arg.parse()?),
        ParamType::Bytes => Value::Bytes(hex::decode(strip_0x(arg))?),
        ParamType::String => Value::String(arg.to_string()),
        ParamType::AddressArray => Value::AddressArray(
            arg.split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Address>, _>>()?,
        ),
    };
    Ok(value)
}

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Uint64(v) => v.to_string(),
        Value::Address(a) => a.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Bytes(b) => format!("0x{}", hex::encode(b)),
        Value::String(s) => s.clone(),
        Value::AddressArray(addrs) => {
            let items: Vec<String> = addrs.iter().map(Address::to_string).collect();
            format!("[{}]", items.join(","))
        }
    }
}

/// Selector of `signature` as hex; any type names are accepted
fn selector_hex(signature: &str) -> String {
    let signature = signature.trim();
    match Function::parse(signature) {
        Ok(function) => {
            debug!("Canonical signature: {}", function);
            hex::encode(function.selector())
        }
        Err(e) => {
            debug!("Hashing {} as written: {}", signature, e);
            hex::encode(selector(signature))
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Command::Selector { signature } => {
            println!("{}", selector_hex(&signature));
        }
        Command::Encode { signature, args, no_selector } => {
            let function = Function::parse(&signature)?;
            if args.len() != function.inputs.len() {
                return Err(format!(
                    "{} takes {} arguments, got {}",
                    function,
                    function.inputs.len(),
                    args.len()
                )
                .into());
            }
            let values = function
                .inputs
                .iter()
                .zip(&args)
                .map(|(ty, arg)| parse_value(*ty, arg))
                .collect::<Result<Vec<Value>, _>>()?;
            debug!("Encoding {} values for {}", values.len(), function);

            let encoded = if no_selector {
                contract_abi::encode(&values)?
            } else {
                function.encode_input(&values)?
            };
            println!("{}", hex::encode(encoded));
        }
        Command::Decode { types, data, legacy } => {
            let types = types
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<ParamType>, _>>()?;
            let data = hex::decode(strip_0x(data.trim()))?;
            debug!("Decoding {} bytes as {} values", data.len(), types.len());

            let ctx = AbiContext::with_legacy_address_text(legacy);
            for value in ctx.decode(&data, &types)? {
                println!("{}", format_value(&value));
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_value(ParamType::Uint64, "2000").unwrap(), Value::Uint64(2000));
        assert_eq!(parse_value(ParamType::Bool, "true").unwrap(), Value::Bool(true));
        assert_eq!(
            parse_value(ParamType::Bytes, "0x0102").unwrap(),
            Value::Bytes(vec![1, 2])
        );
        assert_eq!(
            parse_value(ParamType::AddressArray, "0x01,0x02").unwrap(),
            Value::AddressArray(vec!["0x01".parse().unwrap(), "0x02".parse().unwrap()])
        );
        assert_eq!(
            parse_value(ParamType::AddressArray, "").unwrap(),
            Value::AddressArray(Vec::new())
        );
        assert!(parse_value(ParamType::Uint64, "-1").is_err());
        assert!(parse_value(ParamType::Address, "nothex").is_err());
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_value(&Value::Bytes(vec![0xab])), "0xab");
        assert_eq!(
            format_value(&Value::AddressArray(vec!["0x01".parse().unwrap()])),
            "[0x0000000000000000000000000000000000000001]"
        );
    }

    #[test]
    fn test_selector_accepts_any_types() {
        assert_eq!(selector_hex("transfer(address,uint256)"), "a9059cbb");
        assert_eq!(selector_hex(" balanceOf(address) "), "70a08231");
        assert_eq!(
            selector_hex("initConsensusTimer(uint64, uint64,uint64,uint64)"),
            selector_hex("initConsensusTimer(uint64,uint64,uint64,uint64)")
        );

        let args = Args::try_parse_from(["abi-tool", "selector", "transfer(address,uint256)"]).unwrap();
        assert!(run(args).is_ok());
    }

    #[test]
    fn test_cli_parses() {
        let args = Args::try_parse_from(["abi-tool", "decode", "uint64,bool", "00", "--legacy"]).unwrap();
        assert!(matches!(args.command, Command::Decode { legacy: true, .. }));
    }
}
