use arrow::array::{Array, ArrowPrimitiveType, ListArray, PrimitiveArray};
use arrow::record_batch::RecordBatch;

use super::ReaderError;

/// Get a required column of a concrete array type by name.
pub(super) fn get_column<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a T, ReaderError> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?;
    column.as_any().downcast_ref::<T>().ok_or_else(|| {
        ReaderError::InvalidFormat(format!("{} has unexpected type {}", name, column.data_type()))
    })
}

/// Copy the values of one list cell.
pub(super) fn list_values<T: ArrowPrimitiveType>(
    list: &ListArray,
    row: usize,
    name: &str,
) -> Result<Vec<T::Native>, ReaderError> {
    let values = list.value(row);
    let values = values
        .as_any()
        .downcast_ref::<PrimitiveArray<T>>()
        .ok_or_else(|| {
            ReaderError::InvalidFormat(format!(
                "{} holds unexpected item type {}",
                name,
                values.data_type()
            ))
        })?;
    Ok(values.values().to_vec())
}
