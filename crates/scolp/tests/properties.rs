//! Property tests for width growth and throttle cadence.

use proptest::prelude::*;
use scolp::{Column, Config, Scolp, TitleMode};
use std::cell::RefCell;
use std::rc::Rc;

fn capture() -> (Rc<RefCell<String>>, impl FnMut(&str) + 'static) {
    let buf = Rc::new(RefCell::new(String::new()));
    let sink = {
        let buf = Rc::clone(&buf);
        move |s: &str| buf.borrow_mut().push_str(s)
    };
    (buf, sink)
}

proptest! {
    /// A column's effective width is always the running max of its
    /// configured minimum and every rendered length, and never decreases.
    #[test]
    fn width_is_monotone_running_max(
        initial in 0usize..10,
        values in prop::collection::vec("[a-z]{0,12}", 1..40),
    ) {
        let mut cfg = Config::default();
        cfg.title_mode = TitleMode::None;
        cfg.add_column(Column::new("c").width(initial));

        let (_buf, sink) = capture();
        let mut p = Scolp::with_sink(&cfg, sink).unwrap();

        let mut running_max = initial;
        let mut last_width = initial;
        for v in &values {
            p.print([v.as_str()]);
            running_max = running_max.max(v.len());
            let width = p.config().columns[0].width.unwrap();
            prop_assert_eq!(width, running_max);
            prop_assert!(width >= last_width);
            last_width = width;
        }
    }

    /// Every emitted line is padded to the column width in effect when it
    /// was printed, so line lengths track the running max exactly.
    #[test]
    fn emitted_lines_match_running_width(
        values in prop::collection::vec("[a-z]{1,9}", 1..30),
    ) {
        let mut cfg = Config::default();
        cfg.title_mode = TitleMode::None;
        cfg.add_column(Column::new("c").width(2));

        let (buf, sink) = capture();
        let mut p = Scolp::with_sink(&cfg, sink).unwrap();
        for v in &values {
            p.print([v.as_str()]);
        }

        let out = buf.borrow();
        let mut running_max = 2usize;
        for (line, v) in out.lines().zip(&values) {
            running_max = running_max.max(v.len());
            prop_assert_eq!(line.len(), running_max);
            prop_assert!(line.starts_with(v.as_str()));
        }
        prop_assert_eq!(out.lines().count(), values.len());
    }

    /// Two-column rows stay re-parseable by the separator: the first column
    /// of each line is exactly the width in effect for that row.
    #[test]
    fn rows_reparse_at_separator(
        rows in prop::collection::vec(("[a-z]{1,8}", "[a-z]{1,8}"), 1..20),
    ) {
        let mut cfg = Config::default();
        cfg.title_mode = TitleMode::None;
        cfg.defaults.width = 3;
        cfg.add_columns(["a", "b"]);

        let (buf, sink) = capture();
        let mut p = Scolp::with_sink(&cfg, sink).unwrap();
        for (a, b) in &rows {
            p.print([a.as_str(), b.as_str()]);
        }

        let out = buf.borrow();
        let mut width_a = 3usize;
        for (line, (a, _)) in out.lines().zip(&rows) {
            width_a = width_a.max(a.len());
            let (left, _right) = line.split_once('|').unwrap();
            prop_assert_eq!(left.len(), width_a);
            prop_assert!(left.starts_with(a.as_str()));
        }
    }

    /// With `output_every_n_rows = k` and no time gate, exactly the rows
    /// with `row_index % k == 0` are emitted.
    #[test]
    fn throttle_cadence(k in 1u64..6, n in 1u64..40) {
        let mut cfg = Config::default();
        cfg.title_mode = TitleMode::None;
        cfg.defaults.width = 1;
        cfg.output_every_n_rows = k;
        cfg.add_column(Column::new("n"));

        let (buf, sink) = capture();
        let mut p = Scolp::with_sink(&cfg, sink).unwrap();
        for i in 0..n {
            p.print([i]);
        }

        let out = buf.borrow();
        let printed: Vec<u64> = out.lines().map(|l| l.trim().parse().unwrap()).collect();
        let expected: Vec<u64> = (0..n).filter(|i| i % k == 0).collect();
        prop_assert_eq!(printed, expected);
        prop_assert_eq!(p.row_index(), n);
    }
}
