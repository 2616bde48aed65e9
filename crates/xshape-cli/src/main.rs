use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "xshape",
    version,
    about = "Run an XML/CSV document transform over a file or stdin"
)]
struct Args {
    /// Transform to run
    #[arg(value_enum, value_name = "OPERATION")]
    operation: Operation,
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Clone, Debug, ValueEnum)]
enum Operation {
    CreateHierarchy,
    PurchaseOrders,
    CustomersFromCsv,
    ConcatenationString,
    ReplaceCustomersWithContacts,
    ChannelIds,
    SortCustomers,
    FlattenString,
    OrdersValue,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = read_input(&args.input)?;
    let output = run(&args.operation, &input)?;
    write_output(&args.output, output.as_bytes())?;
    Ok(())
}

fn run(operation: &Operation, input: &str) -> Result<String> {
    let output = match operation {
        Operation::CreateHierarchy => xshape::create_hierarchy(input)?,
        Operation::PurchaseOrders => xshape::purchase_orders(input)?,
        Operation::CustomersFromCsv => xshape::customers_from_csv(input)?,
        Operation::ConcatenationString => xshape::concatenation_string(input)?,
        Operation::ReplaceCustomersWithContacts => {
            xshape::replace_customers_with_contacts(input)?
        }
        Operation::ChannelIds => {
            let ids: Vec<String> = xshape::channel_ids(input)?
                .map(|id| id.to_string())
                .collect();
            ids.join("\n")
        }
        Operation::SortCustomers => xshape::sort_customers(input)?,
        Operation::FlattenString => {
            let doc = xshape::parse_document(input)?;
            xshape::flatten_string(&doc.root)
        }
        Operation::OrdersValue => xshape::orders_value(input)?.to_string(),
    };
    Ok(output)
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            stdout.write_all(b"\n").context("failed to write stdout")?;
            Ok(())
        }
    }
}
