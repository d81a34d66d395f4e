//! Output helpers shared by the command line front end

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable that disables paging when set
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// Adapts the minus pager to `std::io::Write`
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
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

/// Page output when stdout is a terminal and paging is not disabled
pub fn should_page() -> bool {
    io::stdout().is_terminal() && std::env::var_os(NO_PAGER_ENV).is_none()
}

/// Run `render` against the pager or straight against stdout
pub fn with_output<F>(render: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    if !should_page() {
        let mut stdout = io::stdout().lock();
        render(&mut stdout)?;
        return stdout.flush();
    }

    let mut writer = PagerWriter::new(Pager::new());
    render(&mut writer)?;
    minus::page_all(writer.pager().clone()).map_err(io::Error::other)
}
