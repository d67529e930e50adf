//! End-to-end tests of the line protocol.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use gamma::batch::{LineReader, Mode, read_setup, run_batch};

/// Run a whole script, returning (stdout, stderr).
fn run_script(script: &str) -> (String, String) {
    let mut lines = LineReader::new(script.as_bytes());
    let mut out = Vec::new();
    let mut err = Vec::new();

    if let Some((mode, mut board)) = read_setup(&mut lines, &mut out, &mut err).unwrap() {
        assert_eq!(mode, Mode::Batch);
        run_batch(&mut board, &mut lines, &mut out, &mut err).unwrap();
    }

    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
fn test_single_cell_board() {
    let (out, err) = run_script("B 1 1 2 1\nm 1 0 0\nb 1\nf 1\n");
    assert_eq!(out, "OK 1\n1\n1\n0\n");
    assert!(err.is_empty());
}

#[test]
fn test_move_onto_occupied_cell() {
    let (out, _) = run_script("B 2 1 2 1\nm 1 0 0\nm 2 0 0\np\n");
    assert_eq!(out, "OK 1\n1\n0\n1.\n");
}

#[test]
fn test_second_area_over_limit() {
    let (out, _) = run_script("B 3 1 1 1\nm 1 0 0\nm 1 2 0\nb 1\nf 1\n");
    assert_eq!(out, "OK 1\n1\n0\n1\n1\n");
}

#[test]
fn test_golden_move_merges_capturer() {
    let script = "B 3 1 2 2\nm 1 1 0\nm 2 0 0\nm 2 2 0\nq 2\ng 2 1 0\nq 2\np\nb 1\nb 2\n";
    let (out, err) = run_script(script);
    assert_eq!(out, "OK 1\n1\n1\n1\n1\n1\n0\n222\n0\n3\n");
    assert!(err.is_empty());
}

#[test]
fn test_free_fields_shrink_at_limit() {
    let script = "B 4 4 2 1\nf 1\nm 1 1 1\nf 1\nm 1 1 2\nf 1\n";
    let (out, _) = run_script(script);
    assert_eq!(out, "OK 1\n16\n1\n4\n1\n6\n");
}

#[test]
fn test_comments_and_blank_lines_count() {
    let script = "# game\n\nB 2 2 2 1\n# move\n\nm 1 0 0\nbogus\n";
    let (out, err) = run_script(script);
    assert_eq!(out, "OK 3\n1\n");
    assert_eq!(err, "ERROR 7\n");
}

#[test]
fn test_errors_before_game() {
    let script = "B 2 2 2\nI 0 2 2 2\nm 1 0 0\nB 4294967296 1 1 1\nB 2 2 2 2\n";
    let (out, err) = run_script(script);
    assert_eq!(out, "OK 5\n");
    assert_eq!(err, "ERROR 1\nERROR 2\nERROR 3\nERROR 4\n");
}

#[test]
fn test_whitespace_variants() {
    let script = "B\t2 \x0b2\x0c2\r2\nm  1\t1 1\r\nb\t1 \n";
    let (out, err) = run_script(script);
    assert_eq!(out, "OK 1\n1\n1\n");
    assert!(err.is_empty());
}

#[test]
fn test_invalid_players_and_coordinates() {
    let script = "B 2 2 2 2\nm 0 0 0\nm 3 0 0\nm 1 2 0\ng 1 0 0\nb 3\nf 0\nq 9\n";
    let (out, err) = run_script(script);
    assert_eq!(out, "OK 1\n0\n0\n0\n0\n0\n0\n0\n");
    assert!(err.is_empty());
}

#[test]
fn test_print_many_players() {
    let script = "B 2 2 10 2\nm 10 0 0\nm 2 1 1\np\n";
    let (out, _) = run_script(script);
    assert_eq!(out, "OK 1\n1\n1\n  .  2\n 10  .\n");
}

#[test]
fn test_unterminated_final_command() {
    let (out, err) = run_script("B 2 2 2 2\nm 1 0 0\nb 1");
    assert_eq!(out, "OK 1\n1\n");
    assert_eq!(err, "ERROR 3\n");
}

#[test]
fn test_empty_input() {
    let (out, err) = run_script("");
    assert!(out.is_empty());
    assert!(err.is_empty());
}
