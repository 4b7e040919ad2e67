//! FFI interface for C++ interop
//!
//! Provides a C-compatible entry point for extracting a site record from HTML.
//! Requests and results cross the boundary as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::ParsedDocument;
use crate::error::{ExtractError, Result};
use crate::extractors::gtin::ChecksumGtin;
use crate::records::ExtractionResult;
use crate::sites::{extract_with, Site, SiteSelectors};

/// Request for extraction from C++
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Site id (`"americanas"`) or host (`"www.americanas.com.br"`)
    pub site: String,
    /// URL the HTML was fetched from
    pub url: String,
    /// Replaces the site's default selector table
    #[serde(default)]
    pub selectors: Option<SiteSelectors>,
}

/// Result struct returned to C++
/// Both pointers are owned by Rust and must be freed via free_extraction_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized record (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract the record of a supported site from HTML.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `request_json` - JSON-serialized ExtractionRequest (null-terminated)
///
/// # Returns
/// ExtractionResultFFI with either json_ptr set (success) or error_ptr set (failure)
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `free_extraction_result`
#[no_mangle]
pub unsafe extern "C" fn extract_record(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> ExtractionResultFFI {
    // Parse HTML
    let html = if html_ptr.is_null() || html_len == 0 {
        ""
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    // Parse request JSON
    if request_json.is_null() {
        return make_error_result("Request JSON is null");
    }
    let request_str = match CStr::from_ptr(request_json).to_str() {
        Ok(s) => s,
        Err(_) => return make_error_result("Invalid UTF-8 in request JSON"),
    };

    let request: ExtractionRequest = match serde_json::from_str(request_str) {
        Ok(r) => r,
        Err(e) => {
            return make_error_result(&format!("Failed to parse request JSON: {}", e));
        }
    };

    // Perform extraction
    let result = match perform_extraction(html, &request) {
        Ok(result) => result,
        Err(e) => {
            warn!(site = %request.site, url = %request.url, error = %e, "extraction request rejected");
            return make_error_result(&e.to_string());
        }
    };

    // Serialize result to JSON
    match serde_json::to_string(&result) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ExtractionResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Free an ExtractionResultFFI returned by extract_record
///
/// # Safety
/// - `result` must have been returned by `extract_record`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_extraction_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ExtractionResultFFI {
    let error_cstr = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}

// Resolve the request against the parsed page
fn perform_extraction(html: &str, request: &ExtractionRequest) -> Result<ExtractionResult> {
    let site: Site = request.site.parse()?;
    if request.url.trim().is_empty() {
        return Err(ExtractError::InvalidRequest("url is empty".to_string()));
    }

    let document = ParsedDocument::parse(html, request.url.trim())?;
    let selectors = request
        .selectors
        .as_ref()
        .unwrap_or_else(|| site.default_selectors());

    Ok(extract_with(site, &document, selectors, &ChecksumGtin))
}
