mod format;
mod path;

pub use format::{
    file_stamp, format_size, format_thousands, format_timestamp, gigabytes, local_offset,
    megabytes, now_in, BYTES_PER_GB, BYTES_PER_MB,
};
pub use path::{extension_label, file_name, NO_EXTENSION};
