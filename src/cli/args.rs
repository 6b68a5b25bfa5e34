use {anyhow::bail, clap::Parser};

use crate::BayouError;

// A struct that represents the command line arguments.
#[derive(Debug, Parser)]
#[command(about = "A tour catalog browser for the terminal")]
pub struct Args {
    /// The tour catalog to browse: a file path or an http(s) URL
    #[arg(index = 1)]
    pub catalog: Option<String>,

    /// Print the matching tours and exit, without the TUI
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Only list tours in the given activity category
    #[arg(short = 'a', long = "activity")]
    pub activity: Option<String>,

    /// Only list tours in the given price bucket, e.g. '50-100' or '200+'
    #[arg(short = 'p', long = "price")]
    pub price: Option<String>,

    /// Only list tours matching the given search text
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Use the terminal background color
    #[arg(short = 'b', long = "term_bg")]
    pub term_bg: bool,

    /// Use the terminal foreground and background colors only
    #[arg(short = 't', long = "term_color")]
    pub term_color: bool,

    /// Use the default color scheme
    #[arg(short = 'c', long = "default_color")]
    pub default_color: bool,

    /// Set the color scheme with <NAME>=<COLOR>
    /// For example:
    ///'--color fg=c5c8c6,bg=1b1e1b,hl=f0c674,prompt=707870,title=b5bd68,price=8abeb7,badge=81a2be,info=b294bb,err=cc6666'
    #[arg(long = "color", verbatim_doc_comment)]
    pub color: Option<String>,

    /// Print the current version
    #[arg(short = 'v', long = "version")]
    pub check_version: bool,
}

impl Args {
    pub fn parse_args() -> Result<Self, BayouError> {
        let args = Self::try_parse()?;
        args.validate()?;

        Ok(args)
    }

    fn validate(&self) -> Result<(), BayouError> {
        if !self.list {
            for (flag, value) in [
                ("--activity", &self.activity),
                ("--price", &self.price),
                ("--query", &self.query),
            ] {
                if value.is_some() {
                    bail!("'{flag}' can only be used with '--list'");
                }
            }
        }

        Ok(())
    }
}
