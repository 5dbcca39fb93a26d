use std::cell::RefCell;
use std::io::{self, Read, Seek, SeekFrom};
use std::rc::Rc;

/// A cloneable handle to one underlying byte source.
///
/// All clones share the source and therefore its cursor. Whoever reads through a clone
/// is expected to seek to where they want to be first, which `SubStream` does on every read.
#[derive(Debug)]
pub struct SharedSource<R>(Rc<RefCell<R>>);

impl<R> SharedSource<R> {
    pub fn new(inner: R) -> Self {
        return SharedSource(Rc::new(RefCell::new(inner)));
    }
}

impl<R> Clone for SharedSource<R> {
    fn clone(&self) -> Self {
        return SharedSource(Rc::clone(&self.0));
    }
}

impl<R: Read> Read for SharedSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        return self.0.borrow_mut().read(buf);
    }
}

impl<R: Seek> Seek for SharedSource<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        return self.0.borrow_mut().seek(pos);
    }
}

/// A window of `len` bytes starting at `start` in some other source.
///
/// Reads never go past the window, they report end of stream instead.
/// The inner source is re-positioned before every read, so it may be shared with other readers.
#[derive(Debug, Clone)]
pub struct SubStream<R> {
    inner: R,
    start: u64,
    len: u64,
    cur: u64,
}

impl<R> SubStream<R> {
    pub fn new(inner: R, start: u64, len: u64) -> Self {
        return SubStream {
            inner,
            start,
            len,
            cur: 0,
        };
    }

    pub fn len(&self) -> u64 {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }
}

impl<R: Read + Seek> Read for SubStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.cur >= self.len || buf.is_empty() {
            return Ok(0);
        }
        let position = self.start.checked_add(self.cur).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "sub-stream position overflows")
        })?;
        self.inner.seek(SeekFrom::Start(position))?;
        let left = usize::try_from(self.len - self.cur).unwrap_or(usize::MAX);
        let want = buf.len().min(left);
        let n = self.inner.read(&mut buf[..want])?;
        self.cur += n as u64;
        return Ok(n);
    }
}

impl<R> Seek for SubStream<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(d) => self.len.checked_add_signed(d),
            SeekFrom::Current(d) => self.cur.checked_add_signed(d),
        };
        match target {
            Some(target) => {
                self.cur = target;
                return Ok(target);
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "seek to a negative position",
                ))
            }
        }
    }
}
