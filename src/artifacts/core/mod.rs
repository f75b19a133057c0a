//! Shared plumbing: error taxonomy and the pager-backed writer

pub mod error;

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Adapts the `minus` pager to `std::io::Write` so long `log` and `diff` output
/// can be routed through the repository writer.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    /// Paging is used only for an interactive stdout and when `NO_PAGER` is unset.
    pub fn should_page() -> bool {
        std::env::var_os("NO_PAGER").is_none() && io::stdout().is_terminal()
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
