//! Console output of 7-Zip 16.02 runs, as shell snippets that replay it.

/// `a` run adding two files
pub const ADD_REPORT: &str = r#"cat <<'OUT'
7-Zip [64] 16.02 : Copyright (c) 1999-2016 Igor Pavlov : 2016-05-21

Scanning the drive:
2 files, 38 bytes (1 KiB)

Creating archive: test.7z

Items to compress: 2

+ README.md
+ docs/guide.md

Files read from disk: 2
Archive size: 211 bytes (1 KiB)
Everything is Ok
OUT"#;

/// `e`/`x` run extracting two files
pub const EXTRACT_REPORT: &str = r#"cat <<'OUT'
Extracting archive: test.7z
--
Path = test.7z
Type = 7z
Physical Size = 211

- file1.txt
- folder/file0.txt

Everything is Ok
OUT"#;

/// `t` run
pub const TEST_REPORT: &str = r#"cat <<'OUT'
Testing archive: test.7z
--
Path = test.7z
Type = 7z

T zip/file1.txt
T zip/folder/file0.txt

Everything is Ok
OUT"#;

/// `u` and `rn` runs
pub const UPDATE_REPORT: &str = r#"cat <<'OUT'
Updating archive: test.7z

U renamed.txt
+ unrelated.txt

Everything is Ok
OUT"#;

/// `l` run whose first row arrives in two writes
pub const LIST_REPORT: &str = r#"cat <<'OUT'
Listing archive: test/zip.7z

--
Path = test/zip.7z
Type = 7z
Physical Size = 1234
Headers Size = 201
Method = LZMA2:12

   Date      Time    Attr         Size   Compressed  Name
------------------- ----- ------------ ------------  ------------------------
OUT
printf '2019-06-03 10:11:12 ....A           12    '
sleep 0.05
printf '       40  zip/file1.txt\n'
cat <<'OUT'
2019-06-03 10:11:13 D....            0            0  zip/folder
2019-06-03 10:11:14 ....A           12               zip/file2.txt
------------------- ----- ------------ ------------  ------------------------
2019-06-03 10:11:14                 24           40  2 files, 1 folders
OUT"#;

/// Stderr of an unknown command, exit code 7
pub const UNSUPPORTED_COMMAND: &str = r#"echo >&2
echo 'Command Line Error:' >&2
echo 'Unsupported command:' >&2
echo '???' >&2
exit 7"#;

/// Stderr of a damaged archive, exit code 2
pub fn broken_archive(reason: &str) -> String {
    format!("echo 'ERROR: {}' >&2\nexit 2", reason)
}
