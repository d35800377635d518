//! A scripted, allocation-counting stand-in for libnfd.

#![allow(dead_code)]

use std::ffi::{CString, c_char};
use std::ptr::{self, NonNull};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use nfdkit_dialog::NativeText;
use nfdkit_dialog::sys::{
    NativeBackend, NativeDialogs, NfdResult, RawFilter, nfdfiltersize_t, nfdpathset_t,
    nfdpathsetsize_t, nfdresult_t,
};

/// What the fake dialog does when shown.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Select these paths; single-selection dialogs return the first one.
    Select(Vec<String>),
    /// Return the default path the dialog was opened with.
    EchoDefaultPath,
    /// Return the default file name (save dialog).
    EchoDefaultName,
    /// The user dismissed the dialog.
    Cancel,
    /// Fail with this message.
    Fail(String),
    /// Fail without leaving a message in the error state.
    FailWithoutMessage,
    /// Report success but leave the output pointer null.
    OkayWithoutPath,
    /// Return a result code the library never produces.
    Raw(nfdresult_t),
    /// Panic inside the native call.
    Panic,
}

/// Arguments a dialog entry point received, decoded back to Rust strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: &'static str,
    pub filters: Vec<(String, String)>,
    pub filter_ptr_null: bool,
    pub default_path: Option<String>,
    pub default_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct Counters {
    pub inits: AtomicUsize,
    pub quits: AtomicUsize,
    pub error_reads: AtomicUsize,
    pub error_clears: AtomicUsize,
    pub string_allocs: AtomicUsize,
    pub string_frees: AtomicUsize,
    pub paths_returned: AtomicUsize,
    pub paths_freed: AtomicUsize,
    pub set_entries_returned: AtomicUsize,
    pub set_entries_freed: AtomicUsize,
    pub sets_returned: AtomicUsize,
    pub sets_freed: AtomicUsize,
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

fn read(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

#[derive(Debug)]
pub struct FakeNfd {
    reply: Reply,
    init_error: Option<String>,
    error: Mutex<Option<CString>>,
    calls: Mutex<Vec<Call>>,
    pub counters: Counters,
}

impl FakeNfd {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            init_error: None,
            error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            counters: Counters::default(),
        }
    }

    /// A backend whose `NFD_Init` fails with `message`.
    pub fn failing_init(message: &str) -> Self {
        Self {
            init_error: Some(message.to_owned()),
            ..Self::new(Reply::Cancel)
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inits(&self) -> usize {
        read(&self.counters.inits)
    }

    pub fn quits(&self) -> usize {
        read(&self.counters.quits)
    }

    pub fn error_clears(&self) -> usize {
        read(&self.counters.error_clears)
    }

    pub fn string_allocs(&self) -> usize {
        read(&self.counters.string_allocs)
    }

    pub fn string_frees(&self) -> usize {
        read(&self.counters.string_frees)
    }

    /// Every path or path-set handed out has been freed exactly once.
    pub fn results_balanced(&self) -> bool {
        let c = &self.counters;
        read(&c.paths_returned) == read(&c.paths_freed)
            && read(&c.set_entries_returned) == read(&c.set_entries_freed)
            && read(&c.sets_returned) == read(&c.sets_freed)
    }

    fn set_error(&self, message: &str) {
        *self.error.lock().unwrap() = Some(CString::new(message).unwrap());
    }

    fn record<E: NativeText>(
        &self,
        op: &'static str,
        filters: *const RawFilter<E>,
        count: nfdfiltersize_t,
        default_path: *const E::Unit,
        default_name: *const E::Unit,
    ) {
        let decode = |ptr: *const E::Unit| {
            (!ptr.is_null()).then(|| unsafe { E::decode(ptr) }.unwrap())
        };
        let filters_decoded = (0..count as usize)
            .map(|i| {
                let item = unsafe { &*filters.add(i) };
                (decode(item.name).unwrap(), decode(item.spec).unwrap())
            })
            .collect();

        self.calls.lock().unwrap().push(Call {
            op,
            filters: filters_decoded,
            filter_ptr_null: filters.is_null(),
            default_path: decode(default_path),
            default_name: decode(default_name),
        });
    }

    /// Apply the scripted reply to a call producing a single path.
    fn reply_single<E: NativeText>(&self, out_path: *mut *mut E::Unit) -> nfdresult_t {
        let last = self.calls.lock().unwrap().last().cloned().unwrap();
        let path = match self.reply.clone() {
            Reply::Select(paths) => paths.into_iter().next().unwrap(),
            Reply::EchoDefaultPath => last.default_path.unwrap_or_default(),
            Reply::EchoDefaultName => last.default_name.unwrap_or_default(),
            other => return self.reply_without_result(other),
        };

        let ptr = E::alloc(&path).unwrap();
        bump(&self.counters.paths_returned);
        unsafe { *out_path = ptr.as_ptr() };
        NfdResult::Okay.into_raw()
    }

    fn reply_without_result(&self, reply: Reply) -> nfdresult_t {
        match reply {
            Reply::Cancel => NfdResult::Cancel.into_raw(),
            Reply::Fail(message) => {
                self.set_error(&message);
                NfdResult::Error.into_raw()
            }
            Reply::FailWithoutMessage => NfdResult::Error.into_raw(),
            Reply::OkayWithoutPath => NfdResult::Okay.into_raw(),
            Reply::Raw(code) => code,
            Reply::Panic => panic!("native dialog crashed"),
            Reply::Select(_) | Reply::EchoDefaultPath | Reply::EchoDefaultName => {
                unreachable!("handled by the caller")
            }
        }
    }
}

unsafe impl NativeBackend for FakeNfd {
    fn init(&self) -> nfdresult_t {
        bump(&self.counters.inits);
        match &self.init_error {
            Some(message) => {
                self.set_error(message);
                NfdResult::Error.into_raw()
            }
            None => NfdResult::Okay.into_raw(),
        }
    }

    fn quit(&self) {
        bump(&self.counters.quits);
    }

    fn get_error(&self) -> *const c_char {
        bump(&self.counters.error_reads);
        self.error
            .lock()
            .unwrap()
            .as_ref()
            .map_or(ptr::null(), |message| message.as_ptr())
    }

    fn clear_error(&self) {
        bump(&self.counters.error_clears);
        *self.error.lock().unwrap() = None;
    }

    unsafe fn path_set_get_count(
        &self,
        path_set: *const nfdpathset_t,
        count: *mut nfdpathsetsize_t,
    ) -> nfdresult_t {
        let paths = unsafe { &*path_set.cast::<Vec<String>>() };
        unsafe { *count = nfdpathsetsize_t::try_from(paths.len()).unwrap() };
        NfdResult::Okay.into_raw()
    }

    unsafe fn path_set_free(&self, path_set: *const nfdpathset_t) {
        bump(&self.counters.sets_freed);
        drop(unsafe { Box::from_raw(path_set.cast::<Vec<String>>().cast_mut()) });
    }
}

unsafe impl<E: NativeText> NativeDialogs<E> for FakeNfd {
    unsafe fn open_dialog(
        &self,
        out_path: *mut *mut E::Unit,
        filters: *const RawFilter<E>,
        count: nfdfiltersize_t,
        default_path: *const E::Unit,
    ) -> nfdresult_t {
        self.record::<E>("open", filters, count, default_path, ptr::null());
        self.reply_single::<E>(out_path)
    }

    unsafe fn open_dialog_multiple(
        &self,
        out_paths: *mut *const nfdpathset_t,
        filters: *const RawFilter<E>,
        count: nfdfiltersize_t,
        default_path: *const E::Unit,
    ) -> nfdresult_t {
        self.record::<E>("open_multiple", filters, count, default_path, ptr::null());
        let paths = match self.reply.clone() {
            Reply::Select(paths) => paths,
            Reply::EchoDefaultPath => {
                let last = self.calls.lock().unwrap().last().cloned().unwrap();
                vec![last.default_path.unwrap_or_default()]
            }
            other => return self.reply_without_result(other),
        };

        bump(&self.counters.sets_returned);
        let set = Box::into_raw(Box::new(paths));
        unsafe { *out_paths = set.cast_const().cast() };
        NfdResult::Okay.into_raw()
    }

    unsafe fn save_dialog(
        &self,
        out_path: *mut *mut E::Unit,
        filters: *const RawFilter<E>,
        count: nfdfiltersize_t,
        default_path: *const E::Unit,
        default_name: *const E::Unit,
    ) -> nfdresult_t {
        self.record::<E>("save", filters, count, default_path, default_name);
        self.reply_single::<E>(out_path)
    }

    unsafe fn pick_folder(
        &self,
        out_path: *mut *mut E::Unit,
        default_path: *const E::Unit,
    ) -> nfdresult_t {
        self.record::<E>("pick_folder", ptr::null(), 0, default_path, ptr::null());
        self.reply_single::<E>(out_path)
    }

    unsafe fn free_path(&self, path: *mut E::Unit) {
        bump(&self.counters.paths_freed);
        unsafe { E::release(NonNull::new(path).unwrap()) };
    }

    unsafe fn path_set_get_path(
        &self,
        path_set: *const nfdpathset_t,
        index: nfdpathsetsize_t,
        out_path: *mut *mut E::Unit,
    ) -> nfdresult_t {
        let paths = unsafe { &*path_set.cast::<Vec<String>>() };
        let ptr = E::alloc(&paths[index as usize]).unwrap();
        bump(&self.counters.set_entries_returned);
        unsafe { *out_path = ptr.as_ptr() };
        NfdResult::Okay.into_raw()
    }

    unsafe fn path_set_free_path(&self, path: *const E::Unit) {
        bump(&self.counters.set_entries_freed);
        unsafe { E::release(NonNull::new(path.cast_mut()).unwrap()) };
    }

    fn alloc_string(&self, text: &str) -> Result<NonNull<E::Unit>, nfdkit_dialog::DialogError> {
        let ptr = E::alloc(text)?;
        bump(&self.counters.string_allocs);
        Ok(ptr)
    }

    unsafe fn free_string(&self, ptr: NonNull<E::Unit>) {
        bump(&self.counters.string_frees);
        unsafe { E::release(ptr) };
    }
}
