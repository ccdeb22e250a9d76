//! The compiled-in default tree.
//!
//! Every section and key the application reads has an entry here; the merge
//! never invents keys beyond this table (free-form options sections aside).
//! Section order is meaningful: it is the merge order, `model` must precede
//! `model_options` so backend substitution can read the resolved class, and
//! the first key of `expire_options` is the fallback expiry.

use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::value::{Section, Value};

/// Sections that must be present in any source file that is loaded at all.
pub(crate) const MANDATORY_SECTIONS: [&str; 3] = ["main", "model", "model_options"];

pub(crate) static DEFAULTS: LazyLock<IndexMap<String, Section>> = LazyLock::new(build);

/// The default tree, in merge order.
pub(crate) fn defaults() -> &'static IndexMap<String, Section> {
    &DEFAULTS
}

pub(crate) fn section<const N: usize>(pairs: [(&str, Value); N]) -> Section {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn build() -> IndexMap<String, Section> {
    let mut tree = IndexMap::new();

    tree.insert(
        "main".to_string(),
        section([
            ("name", "Driftbin".into()),
            ("basepath", "".into()),
            ("discussion", true.into()),
            ("opendiscussion", false.into()),
            ("discussiondatedisplay", true.into()),
            ("password", true.into()),
            ("fileupload", true.into()),
            ("burnafterreadingselected", false.into()),
            ("defaultformatter", "plaintext".into()),
            ("syntaxhighlightingtheme", "".into()),
            ("sizelimit", Value::Int(10_485_760)),
            ("templateselection", false.into()),
            ("template", "slate-dark".into()),
            (
                "availabletemplates",
                Value::List(vec![
                    "slate".into(),
                    "slate-page".into(),
                    "slate-dark".into(),
                    "slate-dark-page".into(),
                    "slate-compact".into(),
                    "slate-compact-page".into(),
                ]),
            ),
            (
                "info",
                "More information on the <a href='https://driftbin.dev/'>project page</a>.".into(),
            ),
            ("notice", "".into()),
            ("languageselection", false.into()),
            ("languagedefault", "".into()),
            ("urlshortener", "".into()),
            ("shortenbydefault", false.into()),
            ("qrcode", true.into()),
            ("email", true.into()),
            ("icon", "jdenticon".into()),
            (
                "cspheader",
                "default-src 'none'; base-uri 'self'; form-action 'none'; manifest-src 'self'; connect-src * blob:; script-src 'self' 'wasm-unsafe-eval'; style-src 'self'; font-src 'self'; frame-ancestors 'none'; frame-src blob:; img-src 'self' data: blob:; media-src blob:; object-src blob:; sandbox allow-same-origin allow-scripts allow-forms allow-modals allow-downloads".into(),
            ),
            ("httpwarning", true.into()),
            ("compression", "zlib".into()),
        ]),
    );

    tree.insert(
        "expire".to_string(),
        section([("default", "1week".into())]),
    );

    tree.insert(
        "expire_options".to_string(),
        section([
            ("5min", Value::Int(300)),
            ("10min", Value::Int(600)),
            ("30min", Value::Int(1800)),
            ("1hour", Value::Int(3600)),
            ("6hours", Value::Int(21600)),
            ("1day", Value::Int(86400)),
            ("1week", Value::Int(604_800)),
            ("1month", Value::Int(2_592_000)),
            ("1year", Value::Int(31_536_000)),
            ("never", Value::Int(0)),
        ]),
    );

    tree.insert(
        "formatter_options".to_string(),
        section([
            ("plaintext", "Plain Text".into()),
            ("syntaxhighlighting", "Source Code".into()),
            ("markdown", "Markdown".into()),
        ]),
    );

    tree.insert(
        "traffic".to_string(),
        section([
            ("limit", Value::Int(10)),
            ("header", "".into()),
            ("exempted", "".into()),
            ("creators", "".into()),
        ]),
    );

    tree.insert(
        "purge".to_string(),
        section([("limit", Value::Int(300)), ("batchsize", Value::Int(10))]),
    );

    tree.insert(
        "model".to_string(),
        section([("class", "Filesystem".into())]),
    );

    tree.insert(
        "model_options".to_string(),
        section([("dir", "data".into())]),
    );

    tree.insert(
        "yourls".to_string(),
        section([("signature", "".into()), ("apiurl", "".into())]),
    );

    tree.insert(
        "shlink".to_string(),
        section([("apikey", "".into()), ("apiurl", "".into())]),
    );

    // update this section when adding, changing or removing js files
    tree.insert(
        "sri".to_string(),
        section([
            (
                "js/base58-2.0.0.js",
                "sha512-cLAfblnsMzUUDp4zOgUiTdrE1r0bT5pCcdiLGVhBwNB9anKDip+cSVeELfVbTJ4VNU7BidO1Blf1mH7JfWxiDw==".into(),
            ),
            (
                "js/dark-mode-switch.js",
                "sha512-D486gDldsGPkBO1hK/pfjtnGt4yRvtg6N82EtejkpWw1PIrGNCf3gJkJFeXWCmYnEa8pLHmerRePysvmToFSXA==".into(),
            ),
            (
                "js/driftbin.js",
                "sha512-mEgv6pvOXOT25RgfoyvBTHzfcWTjrhqe0sbFL4q4ytySTuVFlsMLNq5hH8I52NNbjfj+oKzpYCiIqKc5LkX62w==".into(),
            ),
            (
                "js/jquery-3.7.1.js",
                "sha512-g1vr9rUdVSSBaAjgpPgCtB4sXMPo3u/guT9xA0tnWHl9lRqwtpG/+Rtogi4DATc+4q3G5FDVivbmTekGJbnxNA==".into(),
            ),
            (
                "js/legacy.js",
                "sha512-d9B+VB/vTM/gRYQNP80BO3yKWqEO+Y7SNZgZXl7MQvYfgs+2hCuYe+I7toceJOwTkufBs4OUWIlZCRDnUvHWfQ==".into(),
            ),
            (
                "js/prettify.js",
                "sha512-gJQmr+a/xuIzurn0Wva1RzOdvrrOqsTNNArYhetOfUPTarQaBs4Sohwykbl/82vHetVnjZWLLm4eNB2jMBVJAw==".into(),
            ),
            (
                "js/purify-3.2.7.js",
                "sha512-NyQGDpCOQNwX9+6MF3LjLuTIAJQZn9vaQuEkuS+9Qib6sPHe5hKFAv7TbHV7peOZpji5+5p5Hsi7sFhekKZL5A==".into(),
            ),
            (
                "js/qr-1.4.2.js",
                "sha512-ktaD3QloAbwdWhE+we4Xus8GtXgcxob7yhTuLA5jdsWEu9kh6YPqcVXy2pQnVAB9m/Osg//Pwr/YndlOJvuqtQ==".into(),
            ),
            (
                "js/showdown-2.1.0.js",
                "sha512-M+iSxl/RQMZNZvW+eC+cDC6hlkf0fP7kUh6OuK4Zljbi7aZ7CveCiAANSHwTVGKF2ChnqF8/jKIuhocYIhlZgQ==".into(),
            ),
            (
                "js/zlib-1.3.1.js",
                "sha512-XQ5XPR3UC79kqY2Xyc2aZhfpySWypKzLjiR9N1rjb6ixjW+cDCaaI3UI1t9Vh4GtAaHjob2ErdBwAChat6In2w==".into(),
            ),
        ]),
    );

    tree
}
