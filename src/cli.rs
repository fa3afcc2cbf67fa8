//! 命令行界面
//!
//! - 恰好两个位置参数：直接转换 `<input> <output>`
//! - 没有参数：进入交互菜单
//! - 参数数量不对：先打印用法警告，再进入交互菜单
//!
//! 交互菜单从任意 `BufRead` 读入、向任意 `Write` 写出，方便测试。

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::pipeline;

/// 命令行用法
pub const USAGE: &str = "Usage: ps2_mesh <input.obj|input.json> <output.c|output.json>";

/// 解析后的调用方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// 直接转换
    Direct { input: PathBuf, output: PathBuf },

    /// 交互菜单，`show_usage` 表示参数数量不对
    Interactive { show_usage: bool },
}

/// 解析命令行参数（不含程序名）
pub fn parse_args<I>(args: I) -> Invocation
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    match args.as_slice() {
        [input, output] => Invocation::Direct {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        },
        [] => Invocation::Interactive { show_usage: false },
        _ => Invocation::Interactive { show_usage: true },
    }
}

/// 参数数量不对时的警告
pub fn warn_usage() {
    crate::cli_warn!("Incorrect number of command-line arguments for direct mode.");
    crate::cli_warn!("{}", USAGE);
}

/// 直接转换，返回进程退出码
pub fn run_direct(input: &Path, output: &Path, config: &Config) -> i32 {
    crate::cli_info!("Running in direct conversion mode (2 command-line arguments detected).");

    match pipeline::convert(input, output, config) {
        Ok(summary) => {
            report_success(&summary);
            0
        }
        Err(e) => {
            crate::cli_error!("{}", e);
            1
        }
    }
}

fn report_success(summary: &pipeline::ConversionSummary) {
    crate::cli_info!(
        output = %summary.output.display(),
        face_count = summary.face_count,
        vertex_count = summary.vertex_count,
        skipped_faces = summary.skipped_faces,
        "Conversion complete"
    );
}

fn show_menu<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(40);
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, " Welcome to PS2 Mesh Converter")?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    writeln!(out, "Select an option:")?;
    writeln!(out, "1. Convert mesh")?;
    writeln!(out, "2. Exit")?;
    writeln!(out, "{}", rule)
}

/// 输出提示并读入一行，输入结束时返回 `None`
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn pause<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    prompt(input, out, "\nPress Enter to continue...")?;
    writeln!(out)
}

/// 交互菜单
///
/// 选择 2 或输入结束时返回。
pub fn run_interactive<R: BufRead, W: Write>(mut input: R, mut out: W, config: &Config) -> io::Result<()> {
    loop {
        show_menu(&mut out)?;

        let Some(choice) = prompt(&mut input, &mut out, "Enter your choice (1-2): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(source) = prompt(&mut input, &mut out, "Enter path to input file (.obj or .json): ")? else {
                    return Ok(());
                };
                let Some(target) = prompt(&mut input, &mut out, "Enter path for output file (.c or .json): ")? else {
                    return Ok(());
                };

                match pipeline::convert(Path::new(&source), Path::new(&target), config) {
                    Ok(summary) => {
                        report_success(&summary);
                        writeln!(out, "\nConversion complete! Wrote {}", summary.output.display())?;
                    }
                    Err(e) => {
                        crate::cli_error!("{}", e);
                        writeln!(out, "\nConversion failed. Please check the errors above.")?;
                    }
                }
                pause(&mut input, &mut out)?;
            }
            "2" => return Ok(()),
            _ => {
                writeln!(out, "\nInvalid choice. Please enter 1 or 2.")?;
                pause(&mut input, &mut out)?;
            }
        }
    }
}
