//! Integration tests for the sysctl client.
//!
//! Each test builds a small sysctl-like tree in a temporary directory:
//! directories are key segments and files hold the values.

use std::fs;
use std::path::Path;
use sysctl_tree::{Client, ErrorCode, Snapshot};
use tempfile::TempDir;

/// Create a leaf file (and its parents) readable by everyone.
fn write_leaf(root: &Path, rel: &str, value: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, value).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
    }
}

/// The tree used by most read tests:
/// `f`, `d/f`, `d/d/f1`, `d/d/f2`.
fn ok_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_leaf(temp.path(), "f", "value of f\n");
    write_leaf(temp.path(), "d/f", "value of d.f\n");
    write_leaf(temp.path(), "d/d/f1", "value of d.d.f1\n");
    write_leaf(temp.path(), "d/d/f2", "value of d.d.f2\n");
    temp
}

fn snapshot(pairs: &[(&str, &str)]) -> Snapshot {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

mod construction_tests {
    use super::*;

    #[test]
    fn empty_dir_is_accepted() {
        let temp = TempDir::new().unwrap();
        assert!(Client::new(temp.path()).is_ok());
    }

    #[test]
    fn trailing_slash_is_accepted() {
        let temp = ok_tree();
        let client = Client::new(format!("{}/", temp.path().display())).unwrap();
        assert_eq!(client.get("d.f").unwrap(), "value of d.f");
    }

    #[test]
    fn missing_dir_is_rejected() {
        let temp = TempDir::new().unwrap();
        let err = Client::new(temp.path().join("not-found")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConstructionError);
        assert!(err.to_string().contains("not-found"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_base_reads_and_scans() {
        let temp = ok_tree();
        let outer = TempDir::new().unwrap();
        let link = outer.path().join("sys");
        std::os::unix::fs::symlink(temp.path(), &link).unwrap();

        let client = Client::new(&link).unwrap();
        assert_eq!(client.get("f").unwrap(), "value of f");
        let all = client.get_all().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all["d.d.f1"], "value of d.d.f1");
    }

    #[test]
    fn missing_dir_keeps_io_cause() {
        let temp = TempDir::new().unwrap();
        let err = Client::new(temp.path().join("not-found")).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn file_is_rejected() {
        let temp = ok_tree();
        let err = Client::new(temp.path().join("f")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConstructionError);
    }
}

mod get_tests {
    use super::*;

    #[test]
    fn reads_leaves_at_every_depth() {
        let temp = ok_tree();
        let client = Client::new(temp.path()).unwrap();
        assert_eq!(client.get("f").unwrap(), "value of f");
        assert_eq!(client.get("d.f").unwrap(), "value of d.f");
        assert_eq!(client.get("d.d.f1").unwrap(), "value of d.d.f1");
    }

    #[test]
    fn missing_key_is_read_error() {
        let temp = TempDir::new().unwrap();
        let client = Client::new(temp.path()).unwrap();
        let err = client.get("mykey").unwrap_err();
        assert_eq!(err.code(), ErrorCode::KeyReadError);
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(err.to_string().contains("mykey"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_leaf_is_read_error_but_skipped_by_scan() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write_leaf(temp.path(), "open", "yes");
        write_leaf(temp.path(), "secret", "no");
        let secret = temp.path().join("secret");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
        // Privileged users bypass file modes.
        if fs::read(&secret).is_ok() {
            return;
        }

        let client = Client::new(temp.path()).unwrap();
        let err = client.get("secret").unwrap_err();
        assert_eq!(err.code(), ErrorCode::KeyReadError);
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::PermissionDenied));

        assert_eq!(client.get_all().unwrap(), snapshot(&[("open", "yes")]));
    }

    #[test]
    fn directory_key_is_read_error() {
        let temp = ok_tree();
        let client = Client::new(temp.path()).unwrap();
        let err = client.get("d.d").unwrap_err();
        assert_eq!(err.code(), ErrorCode::KeyReadError);
    }
}

mod pattern_tests {
    use super::*;

    #[test]
    fn empty_tree_gives_empty_snapshot() {
        let temp = TempDir::new().unwrap();
        let client = Client::new(temp.path()).unwrap();
        assert!(client.get_all().unwrap().is_empty());
    }

    #[test]
    fn match_all() {
        let temp = ok_tree();
        let client = Client::new(temp.path()).unwrap();
        assert_eq!(
            client.get_all().unwrap(),
            snapshot(&[
                ("f", "value of f"),
                ("d.f", "value of d.f"),
                ("d.d.f1", "value of d.d.f1"),
                ("d.d.f2", "value of d.d.f2"),
            ])
        );
    }

    #[test]
    fn empty_pattern_equals_get_all() {
        let temp = ok_tree();
        let client = Client::new(temp.path()).unwrap();
        assert_eq!(client.get_pattern("").unwrap(), client.get_all().unwrap());
    }

    #[test]
    fn star_match() {
        let temp = ok_tree();
        let client = Client::new(format!("{}/", temp.path().display())).unwrap();
        assert_eq!(
            client.get_pattern("d.*").unwrap(),
            snapshot(&[
                ("d.f", "value of d.f"),
                ("d.d.f1", "value of d.d.f1"),
                ("d.d.f2", "value of d.d.f2"),
            ])
        );
    }

    #[test]
    fn single_char_match() {
        let temp = ok_tree();
        let client = Client::new(temp.path()).unwrap();
        assert_eq!(
            client.get_pattern("d.d.f?").unwrap(),
            snapshot(&[("d.d.f1", "value of d.d.f1"), ("d.d.f2", "value of d.d.f2")])
        );
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let temp = ok_tree();
        let client = Client::new(temp.path()).unwrap();
        let err = client.get_pattern("d.(").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidPattern);
        assert!(err.to_string().contains("d.("));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_leaf_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write_leaf(temp.path(), "readable", "yes");
        write_leaf(temp.path(), "secret", "no");
        fs::set_permissions(
            temp.path().join("secret"),
            fs::Permissions::from_mode(0o000),
        )
        .unwrap();

        let client = Client::new(temp.path()).unwrap();
        let got = client.get_all().unwrap();
        assert_eq!(got, snapshot(&[("readable", "yes")]));
    }

    #[cfg(unix)]
    #[test]
    fn failing_leaf_aborts_scan_without_partial_result() {
        let temp = ok_tree();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("z")).unwrap();
        let client = Client::new(temp.path()).unwrap();

        let err = client.get_all().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ScanIoError);
        assert!(err.to_string().contains("/z:"));

        // Keys that exclude the broken leaf still scan.
        assert_eq!(client.get_pattern("^d").unwrap().len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn non_regular_entries_are_ignored() {
        let temp = TempDir::new().unwrap();
        write_leaf(temp.path(), "f", "v");
        let _listener = std::os::unix::net::UnixListener::bind(temp.path().join("sock")).unwrap();
        let client = Client::new(temp.path()).unwrap();

        assert_eq!(client.get_all().unwrap(), snapshot(&[("f", "v")]));
    }

    #[test]
    fn base_removed_after_construction_is_scan_error() {
        let temp = ok_tree();
        let base = temp.path().join("sub");
        fs::create_dir(&base).unwrap();
        let client = Client::new(&base).unwrap();
        fs::remove_dir(&base).unwrap();

        let err = client.get_all().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ScanIoError);
    }
}

mod set_tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let temp = TempDir::new().unwrap();
        for leaf in ["a", "b/a", "b/b/a"] {
            write_leaf(temp.path(), leaf, "");
        }
        let client = Client::new(temp.path()).unwrap();

        let keys = snapshot(&[
            ("a", "value of a"),
            ("b.a", "value of b.a"),
            ("b.b.a", "value of b.b.a"),
        ]);
        for (k, v) in &keys {
            client.set(k, v).unwrap();
        }
        for (k, v) in &keys {
            assert_eq!(&client.get(k).unwrap(), v, "key {k}");
        }
    }

    #[test]
    fn set_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let client = Client::new(temp.path()).unwrap();
        client.set("k", "v").unwrap();
        client.set("k", "v").unwrap();
        assert_eq!(client.get("k").unwrap(), "v");
        assert_eq!(fs::read_to_string(temp.path().join("k")).unwrap(), "v");
    }

    #[test]
    fn set_never_creates_directories() {
        let temp = TempDir::new().unwrap();
        let client = Client::new(temp.path()).unwrap();
        let err = client.set("net.ipv4.ip_forward", "1").unwrap_err();
        assert_eq!(err.code(), ErrorCode::KeyWriteError);
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(!temp.path().join("net").exists());
    }
}
