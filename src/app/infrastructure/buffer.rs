use fltk::text::TextBuffer;

/// Copy the contents of an FLTK text buffer into a `String`.
///
/// `TextBuffer::text()` copies the malloc'd string returned by
/// `Fl_Text_Buffer_text()` but never frees it, leaking a full copy of the
/// buffer per call. The change listener reads the buffer on every keystroke,
/// so this goes through the C API and frees the copy itself.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is the live Fl_Text_Buffer owned by `buf`.
    // Fl_Text_Buffer_text returns either null or a NUL-terminated malloc'd
    // copy, which is read once and released with the matching free().
    unsafe {
        let copy = Fl_Text_Buffer_text(buf.as_ptr() as *mut std::ffi::c_void);
        if copy.is_null() {
            return String::new();
        }
        let text = std::ffi::CStr::from_ptr(copy).to_string_lossy().into_owned();
        free(copy as *mut std::ffi::c_void);
        text
    }
}
