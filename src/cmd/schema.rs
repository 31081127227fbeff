//! Schema command - print expected input formats

use crate::core::{CsvField, IncomeRecord, ItemRecord, PortfolioInput};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,

    /// Which CSV input the csv-* formats describe
    #[arg(short, long, value_enum, default_value = "items")]
    input: CsvInput,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the portfolio input format
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CsvInput {
    /// Asset and liability rows (--assets, --liabilities)
    Items,
    /// Income stream rows (--income)
    Income,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn fields(&self) -> &'static [CsvField] {
        match self.input {
            CsvInput::Items => ItemRecord::csv_schema(),
            CsvInput::Income => IncomeRecord::csv_schema(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(PortfolioInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        let names: Vec<&str> = self.fields().iter().map(|f| f.name).collect();
        println!("{}", names.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("CSV Input Format ({:?})", self.input);
        println!("================");
        println!();
        for field in self.fields() {
            let req = if field.required { "required" } else { "optional" };
            println!("{:20} ({:8})  {}", field.name, req, field.description);
        }
        println!();
        match self.input {
            CsvInput::Items => println!(
                "Property rows ignore the value column; value is derived as current_value minus the offset-reduced mortgage"
            ),
            CsvInput::Income => println!(
                "is_salary defaults to true; untaxed streams are counted net as given"
            ),
        }
        Ok(())
    }
}
