use std::{alloc::{self, Layout}, ffi::CStr, mem, os::raw::{c_uint, c_void}, ptr};

use libz_sys::{z_stream, uInt};

/// Capacity of the scratch buffer every drain iteration writes into
pub const SCRATCH_CAPACITY: usize = 5000;

const ALIGN: usize = mem::align_of::<usize>();

/// The codec record together with the scratch output buffer.
///
/// The record lives in a [Box] because the codec keeps a pointer back to it
/// once initialized, and rejects calls made through a record that has moved
pub(crate) struct Session {
    strm: Box<z_stream>,
    scratch: Box<[u8]>
}

// The codec state is reachable only through this session, and the codec keeps
// no thread-local state of its own
unsafe impl Send for Session {}

impl Session {
    pub fn new() -> Self {
        let strm = Box::new(z_stream {
            next_in: ptr::null_mut(),
            avail_in: 0,
            total_in: 0,

            next_out: ptr::null_mut(),
            avail_out: 0,
            total_out: 0,

            msg: ptr::null_mut(),
            state: ptr::null_mut(),

            zalloc,
            zfree,
            opaque: ptr::null_mut(),

            data_type: 0,
            adler: 0,
            reserved: 0
        });

        Self {
            strm,
            scratch: vec![0; SCRATCH_CAPACITY].into_boxed_slice()
        }
    }

    /// The record handed to codec entry points
    pub fn raw(&mut self) -> &mut z_stream {
        &mut self.strm
    }

    /// Points the cursor at `input`. The slice must stay alive
    /// and untouched for as long as the cursor references it
    pub fn set_input(&mut self, input: &[u8]) {
        debug_assert!(input.len() <= c_uint::MAX as usize);

        self.strm.next_in = input.as_ptr() as *mut u8;
        self.strm.avail_in = input.len() as uInt;
    }

    /// Detaches the cursor from the last input slice
    pub fn clear_input(&mut self) {
        self.strm.next_in = ptr::null_mut();
        self.strm.avail_in = 0;
    }

    /// Makes the whole scratch buffer available for output again
    pub fn reset_output(&mut self) {
        self.strm.next_out = self.scratch.as_mut_ptr();
        self.strm.avail_out = self.scratch.len() as uInt;
    }

    /// The bytes written into the scratch buffer since the last [Session::reset_output]
    pub fn produced(&self) -> &[u8] {
        let have = self.scratch.len() - self.strm.avail_out as usize;
        &self.scratch[..have]
    }

    pub fn avail_in(&self) -> usize {
        self.strm.avail_in as usize
    }

    pub fn avail_out(&self) -> usize {
        self.strm.avail_out as usize
    }

    pub fn total_in(&self) -> u64 {
        self.strm.total_in as u64
    }

    pub fn total_out(&self) -> u64 {
        self.strm.total_out as u64
    }

    /// The codec's description of its last error, if it left one
    pub fn message(&self) -> Option<String> {
        if self.strm.msg.is_null() {
            return None;
        }

        // SAFETY: the codec only ever points msg at static, nul-terminated strings
        let msg = unsafe { CStr::from_ptr(self.strm.msg) };
        Some(msg.to_string_lossy().into_owned())
    }
}

// The codec allocates through these instead of its own malloc hooks. Each
// block is prefixed with its total size so zfree can rebuild the layout

extern "C" fn zalloc(_opaque: *mut c_void, items: uInt, size: uInt) -> *mut c_void {
    let size = match (items as usize)
        .checked_mul(size as usize)
        .and_then(|size| size.checked_next_multiple_of(ALIGN))
        .and_then(|size| size.checked_add(mem::size_of::<usize>()))
    {
        Some(size) => size,
        None => return ptr::null_mut()
    };

    let Ok(layout) = Layout::from_size_align(size, ALIGN) else {
        return ptr::null_mut();
    };

    // SAFETY: layout has a non-zero size, it always includes the size prefix
    unsafe {
        let block = alloc::alloc(layout) as *mut usize;
        if block.is_null() {
            return ptr::null_mut();
        }

        *block = size;
        block.add(1) as *mut c_void
    }
}

extern "C" fn zfree(_opaque: *mut c_void, address: *mut c_void) {
    if address.is_null() {
        return;
    }

    // SAFETY: address came from zalloc, so the size prefix sits right before it
    unsafe {
        let block = (address as *mut usize).sub(1);
        let layout = Layout::from_size_align_unchecked(*block, ALIGN);
        alloc::dealloc(block as *mut u8, layout);
    }
}
