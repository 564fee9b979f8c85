use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {name} must be at least 1, got {value}")]
    InvalidArgument { name: &'static str, value: usize },
    #[error("index {index} is out of range [{min}, {max}]")]
    IndexOutOfRange {
        index: usize,
        min: usize,
        max: usize,
    },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

////////////////////////////////////////////////////////////////////////////////

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_positive(name: &'static str, value: usize) -> Result<()> {
    if value < 1 {
        return Err(Error::InvalidArgument { name, value });
    }
    Ok(())
}

pub(crate) fn check_range(index: usize, min: usize, max: usize) -> Result<()> {
    if index < min || index > max {
        return Err(Error::IndexOutOfRange { index, min, max });
    }
    Ok(())
}
