use log::error;
use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;
use thiserror::Error;

pub mod analysis;
pub mod lexer;
pub mod parser;
pub mod statistics;

pub use analysis::external_api::AnalyzerConfig;
pub use analysis::settings_printer::SettingsPrinter;
pub use analysis::severity::Severity;
pub use analysis::style::Style;
pub use analysis::style_set::StyleSet;
pub use analysis::StyleAnalyzer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleGenError {
    #[error("Required argument is missing: {0}")]
    InvalidArgument(&'static str),
    #[error("No style rule is registered under the key: {0}")]
    UnknownRule(String),
    #[error("Unrecognised severity: {0}")]
    UnknownSeverity(String),
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(String),
    #[error("Output of {0} bytes does not fit the length parameter")]
    OutputTooLarge(usize),
}

thread_local! {
    static ERRORS: std::cell::RefCell<Vec<String>> = std::cell::RefCell::new(Vec::new());
}

fn clear_errors() {
    ERRORS.with(|errors| errors.borrow_mut().clear());
}

pub fn stylegen_error(err: &StyleGenError) {
    let message = err.to_string();
    error!("{}", message);
    ERRORS.with(|errors| errors.borrow_mut().push(message));
}

/// Infers the settings section for one C# source buffer.
///
/// Returns a newly allocated string that must be released with
/// `stylegen_free_string`, and writes its length (without the terminator) to
/// `out_len` when that pointer is not null. On failure returns a null pointer
/// and records an error readable through `stylegen_get_errors`; errors from
/// earlier calls on the same thread are discarded.
#[unsafe(no_mangle)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe extern "C" fn stylegen_infer(input: *const c_char, out_len: *mut c_int) -> *mut c_char {
    clear_errors();
    if input.is_null() {
        stylegen_error(&StyleGenError::InvalidArgument("input"));
        return ptr::null_mut();
    }

    let source = match CStr::from_ptr(input).to_str() {
        Ok(source) => source,
        Err(e) => {
            stylegen_error(&StyleGenError::Utf8Error(e.to_string()));
            return ptr::null_mut();
        }
    };

    let analyzer = StyleAnalyzer::new();
    let styles = analyzer.analyze(source);
    let section = SettingsPrinter::new("*.cs").sprint(&analyzer.settings(&styles));

    match CString::new(section) {
        Ok(cstring) => {
            if !out_len.is_null() {
                match output_length(cstring.as_bytes().len()) {
                    Ok(len) => *out_len = len,
                    Err(e) => {
                        stylegen_error(&e);
                        return ptr::null_mut();
                    }
                }
            }
            cstring.into_raw()
        }
        Err(e) => {
            stylegen_error(&StyleGenError::Utf8Error(e.to_string()));
            ptr::null_mut()
        }
    }
}

fn output_length(len: usize) -> Result<c_int, StyleGenError> {
    c_int::try_from(len).map_err(|_| StyleGenError::OutputTooLarge(len))
}

/// Returns the last error recorded on this thread, or a null pointer if there
/// is none.
///
/// The returned string must be freed with `stylegen_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn stylegen_get_errors() -> *mut c_char {
    ERRORS.with(|errors| match errors.borrow().last() {
        Some(last_error) => match CString::new(last_error.clone()) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => ptr::null_mut(),
        },
        None => ptr::null_mut(),
    })
}

/// Frees any string handed out by this library.
#[unsafe(no_mangle)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe extern "C" fn stylegen_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_null_input_records_error() {
        let result = unsafe { stylegen_infer(ptr::null(), ptr::null_mut()) };
        assert!(result.is_null());

        let message = stylegen_get_errors();
        assert!(!message.is_null());
        let text = unsafe { CStr::from_ptr(message) }.to_str().unwrap().to_string();
        unsafe { stylegen_free_string(message) };
        assert_eq!(text, "Required argument is missing: input");
    }

    #[test]
    fn test_successful_infer_clears_errors() {
        let result = unsafe { stylegen_infer(ptr::null(), ptr::null_mut()) };
        assert!(result.is_null());
        assert_eq!(ERRORS.with(|errors| errors.borrow().len()), 1);

        let source = CString::new("class Foo { }").unwrap();
        let result = unsafe { stylegen_infer(source.as_ptr(), ptr::null_mut()) };
        assert!(!result.is_null());
        unsafe { stylegen_free_string(result) };
        assert!(stylegen_get_errors().is_null());
    }

    #[test]
    fn test_output_length_does_not_truncate() {
        assert_eq!(output_length(12), Ok(12));
        let too_large = c_int::MAX as usize + 1;
        assert_eq!(
            output_length(too_large),
            Err(StyleGenError::OutputTooLarge(too_large))
        );
    }

    #[test]
    fn test_infer_renders_section() {
        let source = CString::new("class Foo\n{\n\tvoid Bar()\n\t{\n\t\tvar x = 1;\n\t}\n}\n").unwrap();
        let mut len: c_int = 0;
        let result = unsafe { stylegen_infer(source.as_ptr(), &mut len) };
        assert!(!result.is_null());

        let text = unsafe { CStr::from_ptr(result) }.to_str().unwrap().to_string();
        unsafe { stylegen_free_string(result) };
        assert_eq!(len as usize, text.len());
        assert!(text.starts_with("[*.cs]\n"));
        assert!(text.contains("indent_style = tab\n"));
        assert!(text.contains("csharp_style_var_for_built_in_types = true:error\n"));
    }
}
