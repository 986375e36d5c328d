#[derive(clap::Parser, Debug)]
#[clap(about, version, long_about = None)]
pub(crate) struct Cli {
    /// Source file to compile; reads standard input when omitted
    pub file: Option<std::path::PathBuf>,

    /// Write the LLVM IR module to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,

    /// Keep the anonymous functions of top-level expressions in the module
    #[arg(long)]
    pub keep_anonymous: bool,

    /// Name of the generated LLVM module
    #[arg(long, default_value = "isere")]
    pub module_name: String,
}
