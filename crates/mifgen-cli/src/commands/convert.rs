//! Convert - Array to Memory Image Command
//!
//! Loads an array file, validates it against the word width and writes the
//! memory image. Nothing is written unless every value is in range.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use std::path::PathBuf;

use mifgen_npy::{load_array_with, FloatPolicy};

use super::utils::{
    default_output_path, format_size, is_same_file, path_exists, print_header, print_info,
    print_kv, print_success, print_warning,
};
use crate::cli::ConvertArgs;
use crate::config::MifgenConfig;
use crate::error::{CliError, CliResult};

// =============================================================================
// Execute Command
// =============================================================================

/// Execute the `convert` command
pub fn execute(args: ConvertArgs, config: &MifgenConfig) -> CliResult<()> {
    // Resolve settings before touching any file
    let encoding = config.encoding(args.word_width, args.base.as_deref())?;
    let options = config.load_options(args.truncate_floats);

    let input_path = PathBuf::from(&args.input);
    if !path_exists(&input_path) {
        return Err(CliError::InputNotFound(args.input));
    }

    let output_path = args
        .output
        .as_ref()
        .map_or_else(|| default_output_path(&input_path), PathBuf::from);
    if is_same_file(&input_path, &output_path) {
        return Err(CliError::InvalidArgument(format!(
            "output {} is the input file",
            output_path.display()
        )));
    }
    if path_exists(&output_path) && !args.force {
        return Err(CliError::OutputExists(output_path.display().to_string()));
    }

    print_header("Memory Image Conversion");
    print_kv("Input", &args.input);
    print_kv("Output", &output_path.display().to_string());
    print_kv("Word width", &format!("{} bits", encoding.word_width()));
    print_kv("Base", encoding.radix().token());

    if options.float_policy == FloatPolicy::Truncate {
        print_warning("Fractional values will be truncated toward zero");
    }

    print_info("Loading array...");
    let array = load_array_with(&input_path, &options)?;
    print_kv("Shape", &array.shape_string());
    print_kv("Dtype", array.dtype.name());
    print_kv("Elements", &array.numel().to_string());

    let image = mifgen_encode::convert(&array.values, &encoding, &output_path)?;

    print_kv("Words written", &image.len().to_string());
    print_kv("Output size", &format_size(image.byte_len() as u64));
    print_success(&format!(
        "Successfully converted {} to {}",
        args.input,
        output_path.display()
    ));

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mifgen_encode::EncodeError;
    use mifgen_npy::NpyError;
    use tempfile::tempdir;

    fn args(input: &str, output: &str) -> ConvertArgs {
        ConvertArgs {
            input: input.to_string(),
            output: Some(output.to_string()),
            word_width: None,
            base: None,
            truncate_floats: false,
            force: false,
        }
    }

    #[test]
    fn test_convert_json() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("bias.json");
        let output = temp.path().join("bias.mif");
        std::fs::write(&input, "[0, -1, 255, -128]").unwrap();

        execute(
            args(input.to_str().unwrap(), output.to_str().unwrap()),
            &MifgenConfig::default(),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "0000\nFFFF\n00FF\nFF80\n"
        );
    }

    #[test]
    fn test_convert_missing_input() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("out.mif");
        let result = execute(
            args("does_not_exist.npy", output.to_str().unwrap()),
            &MifgenConfig::default(),
        );
        assert!(matches!(result, Err(CliError::InputNotFound(_))));
    }

    #[test]
    fn test_convert_refuses_overwrite() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("w.json");
        let output = temp.path().join("w.mif");
        std::fs::write(&input, "[1]").unwrap();
        std::fs::write(&output, "keep\n").unwrap();

        let result = execute(
            args(input.to_str().unwrap(), output.to_str().unwrap()),
            &MifgenConfig::default(),
        );
        assert!(matches!(result, Err(CliError::OutputExists(_))));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep\n");

        let mut forced = args(input.to_str().unwrap(), output.to_str().unwrap());
        forced.force = true;
        execute(forced, &MifgenConfig::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "0001\n");
    }

    #[test]
    fn test_convert_errors_leave_no_output() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("out.mif");

        let empty = temp.path().join("empty.json");
        std::fs::write(&empty, "[]").unwrap();
        let result = execute(
            args(empty.to_str().unwrap(), output.to_str().unwrap()),
            &MifgenConfig::default(),
        );
        assert!(matches!(result, Err(CliError::Encode(EncodeError::EmptyInput))));
        assert!(!output.exists());

        let wide = temp.path().join("wide.json");
        std::fs::write(&wide, "[70000]").unwrap();
        let result = execute(
            args(wide.to_str().unwrap(), output.to_str().unwrap()),
            &MifgenConfig::default(),
        );
        assert!(matches!(
            result,
            Err(CliError::Encode(EncodeError::OutOfRange { .. }))
        ));
        assert!(!output.exists());

        let fractional = temp.path().join("frac.json");
        std::fs::write(&fractional, "[0.5]").unwrap();
        let result = execute(
            args(fractional.to_str().unwrap(), output.to_str().unwrap()),
            &MifgenConfig::default(),
        );
        assert!(matches!(
            result,
            Err(CliError::Array(NpyError::NonIntegral { .. }))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_never_overwrites_input() {
        let temp = tempdir().unwrap();
        // JSON content under a .mif name; the default output is the input itself.
        let input = temp.path().join("w.mif");
        std::fs::write(&input, "[1, 2]").unwrap();

        let mut same = args(input.to_str().unwrap(), input.to_str().unwrap());
        same.output = None;
        same.force = true;
        assert!(matches!(
            execute(same, &MifgenConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));

        let mut explicit = args(input.to_str().unwrap(), input.to_str().unwrap());
        explicit.force = true;
        assert!(matches!(
            execute(explicit, &MifgenConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_convert_unsupported_base() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("w.json");
        let output = temp.path().join("w.mif");
        std::fs::write(&input, "[1]").unwrap();

        let mut bad = args(input.to_str().unwrap(), output.to_str().unwrap());
        bad.base = Some("oct".to_string());
        assert!(matches!(
            execute(bad, &MifgenConfig::default()),
            Err(CliError::Encode(EncodeError::UnsupportedBase(_)))
        ));
        assert!(!output.exists());
    }
}
