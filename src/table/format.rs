//! Cell formatting for table display
//!
//! Turns a single Arrow array slot into its display string.

use arrow::array::Array;
use arrow::datatypes::DataType;
use arrow::util::display::{ArrayFormatter, FormatOptions};

/// Format an Arrow array value at the given row index as a display string
///
/// Returns `None` if the value is null or `row` is out of range,
/// `Some(formatted_string)` otherwise. Types the Arrow formatter cannot
/// display render as a `<type>` placeholder instead of failing.
///
/// # Example
/// ```
/// use arrow::array::StringArray;
/// use vitrina::table::format_array_value;
///
/// let array = StringArray::from(vec![Some("hello"), None]);
/// assert_eq!(format_array_value(&array, 0), Some("hello".to_string()));
/// assert_eq!(format_array_value(&array, 1), None);
/// ```
pub fn format_array_value(array: &dyn Array, row: usize) -> Option<String> {
    // NullArray carries no validity buffer, so `is_null` alone misses it
    if row >= array.len() || array.is_null(row) || array.data_type() == &DataType::Null {
        return None;
    }

    let options = FormatOptions::default();
    match ArrayFormatter::try_new(array, &options) {
        Ok(formatter) => Some(formatter.value(row).to_string()),
        Err(e) => {
            log::debug!("no display form for {}: {e}", array.data_type());
            Some(format!("<{}>", array.data_type()))
        }
    }
}

/// Display form of an optional cell: null renders as the empty string.
#[inline]
pub fn display_or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}
