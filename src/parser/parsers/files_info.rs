use super::*;
use crate::parser::interface::{File, FileTableBuilder, FileTime};

use log::{debug, trace};

/// Parse `FilesInfo` (after its tag) and resolve the files against the substreams of the folder.
///
/// `sizes` and `digests` are per substream, in folder order.
pub fn files_info<R: Read + Seek>(
    input: &mut BitReader<R>,
    sizes: &[u64],
    digests: &[Option<u32>],
) -> SevenZResult<Vec<File>> {
    let num_files = input.read_varint_usize()?;
    // Every file needs at least one bit of the header, and this keeps a corrupt count from allocating
    let remaining = input.remaining()?;
    if num_files as u64 > remaining.saturating_mul(8) {
        return Err(SevenZError::BoundsViolation {
            limit: remaining.saturating_mul(8),
            position: num_files as u64,
        });
    }
    debug!("FilesInfo: {} files", num_files);

    let mut table = FileTableBuilder::new(num_files);
    loop {
        let id = input.read_u8()?;
        if id == PropertyID::End as u8 {
            break;
        }
        let size = input.read_varint()?;
        let start = input.position()?;
        input.set_limit(size, false)?;
        files_property(input, &mut table, id, size)?;
        let consumed = input.position()? - start;
        input.clear_limit();
        if consumed != size {
            return Err(SevenZError::SectionLength {
                id,
                declared: size,
                consumed,
            });
        }
    }

    table.assign_substreams(sizes, digests)?;
    return table.build();
}

fn files_property<R: Read + Seek>(
    input: &mut BitReader<R>,
    table: &mut FileTableBuilder,
    id: u8,
    size: u64,
) -> SevenZResult<()> {
    let num_files = table.len();
    match PropertyID::try_from(id) {
        Ok(PropertyID::EmptyStream) => {
            table.set_empty_stream_mask(input.read_bits(num_files)?);
        }
        Ok(PropertyID::EmptyFile) => {
            let num_empty = table.num_empty_streams();
            table.set_empty_file_mask(input.read_bits(num_empty)?);
        }
        Ok(PropertyID::Name) => {
            if input.read_u8()? != 0 {
                return Err(SevenZError::unsupported("external file names"));
            }
            for index in 0..num_files {
                table.set_name(index, input.read_utf16le_cstring()?);
            }
        }
        Ok(PropertyID::CTime) => {
            let times = defined_values(input, num_files, |r| r.read_u64())?;
            table.set_times(FileTime::Created, times);
        }
        Ok(PropertyID::ATime) => {
            let times = defined_values(input, num_files, |r| r.read_u64())?;
            table.set_times(FileTime::Accessed, times);
        }
        Ok(PropertyID::MTime) => {
            let times = defined_values(input, num_files, |r| r.read_u64())?;
            table.set_times(FileTime::Modified, times);
        }
        Ok(PropertyID::WinAttributes) => {
            table.set_attributes(defined_values(input, num_files, |r| r.read_u32())?);
        }
        _ => {
            trace!("Skipping files property {:#04x} ({} bytes)", id, size);
            input.skip(size)?;
        }
    }
    return Ok(());
}

/// The all-or-bits "defined" vector, an external flag that must be 0, then one value per defined file.
fn defined_values<R: Read + Seek, T>(
    input: &mut BitReader<R>,
    num_files: usize,
    mut read: impl FnMut(&mut BitReader<R>) -> SevenZResult<T>,
) -> SevenZResult<Vec<Option<T>>> {
    let defined = input.read_all_or_bits(num_files)?;
    if input.read_u8()? != 0 {
        return Err(SevenZError::unsupported("external file properties"));
    }
    let mut values = Vec::with_capacity(num_files);
    for is_defined in defined.iter().by_vals() {
        if is_defined {
            values.push(Some(read(input)?));
        } else {
            values.push(None);
        }
    }
    return Ok(values);
}
