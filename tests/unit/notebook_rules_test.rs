//! Tests for the notebook-level and cell-level rule catalog

use nblint::config::Settings;
use nblint::lint::notebook_rules::{
    cells_too_long, duplicate_notebook_not_renamed, empty_cells, imports_beyond_first_cell,
    long_filename, missing_closing_md_text, missing_h1_md_heading, missing_opening_md_text,
    non_executed_cells, non_linear_execution, non_portable_filename, notebook_too_long,
    too_few_md_cells, untitled_notebook,
};
use nblint::notebook::Notebook;

use crate::common::{code_cell, make_notebook, md_cell};

fn named(name: &str) -> Notebook {
    make_notebook(name, &[md_cell("# Title")])
}

mod non_linear_execution_rule {
    use super::*;

    #[test]
    fn ascending_counters_pass() {
        let nb = make_notebook(
            "nb.ipynb",
            &[
                code_cell("a = 1", Some(1)),
                code_cell("b = 2", Some(2)),
                code_cell("c = 3", Some(3)),
            ],
        );
        assert!(!non_linear_execution(&nb, &Settings::default()));
    }

    #[test]
    fn out_of_order_counters_fire() {
        let nb = make_notebook(
            "nb.ipynb",
            &[
                code_cell("a = 1", Some(1)),
                code_cell("b = 2", Some(3)),
                code_cell("c = 3", Some(2)),
            ],
        );
        assert!(non_linear_execution(&nb, &Settings::default()));
    }

    #[test]
    fn un_executed_cells_are_skipped() {
        let nb = make_notebook(
            "nb.ipynb",
            &[
                code_cell("a = 1", Some(1)),
                code_cell("b = 2", None),
                code_cell("c = 3", Some(2)),
            ],
        );
        assert!(!non_linear_execution(&nb, &Settings::default()));
    }
}

mod filename_rules {
    use super::*;

    #[test]
    fn untitled_requires_digits_suffix_pattern() {
        let settings = Settings::default();
        assert!(untitled_notebook(&named("Untitled.ipynb"), &settings));
        assert!(untitled_notebook(&named("Untitled12.ipynb"), &settings));
        assert!(!untitled_notebook(&named("UntitledProject.ipynb"), &settings));
        assert!(!untitled_notebook(&named("analysis.ipynb"), &settings));
    }

    #[test]
    fn copy_suffix_fires() {
        let settings = Settings::default();
        assert!(duplicate_notebook_not_renamed(&named("notebook-Copy1.ipynb"), &settings));
        assert!(duplicate_notebook_not_renamed(&named("model-Copy12.ipynb"), &settings));
        assert!(!duplicate_notebook_not_renamed(&named("NotebookBackupCopy.ipynb"), &settings));
    }

    #[test]
    fn non_portable_charset_fires() {
        let settings = Settings::default();
        assert!(non_portable_filename(&named("acs,.-e+.ipynb"), &settings));
        assert!(non_portable_filename(&named("my notebook.ipynb"), &settings));
        assert!(!non_portable_filename(&named("Untitled.ipynb"), &settings));
        assert!(!non_portable_filename(&named("step_2-clean.data.ipynb"), &settings));
    }

    #[test]
    fn long_filename_disabled_without_threshold() {
        let long_name = named("FullNotebookFullNotebookFullNotebook.ipynb");

        let settings = Settings::default();
        assert!(!long_filename(&long_name, &settings));

        let mut settings = Settings::default();
        settings.max_filename_length = Some(20);
        assert!(long_filename(&long_name, &settings));
        assert!(!long_filename(&named("short.ipynb"), &settings));
    }
}

mod structure_rules {
    use super::*;

    #[test]
    fn notebook_too_long_uses_threshold() {
        let mut settings = Settings::default();
        settings.max_cells_in_notebook = 2;

        let cells: Vec<_> =
            (0..3i64).map(|i| code_cell(&format!("x = {i}"), Some(i + 1))).collect();
        assert!(notebook_too_long(&make_notebook("nb.ipynb", &cells), &settings));
        assert!(!notebook_too_long(
            &make_notebook("nb.ipynb", &cells[..2]),
            &settings
        ));
    }

    #[test]
    fn imports_beyond_first_cell_fires_on_late_imports() {
        let settings = Settings::default();

        let late = make_notebook(
            "nb.ipynb",
            &[
                code_cell("import os", Some(1)),
                code_cell("import sys\nprint(sys.path)", Some(2)),
            ],
        );
        assert!(imports_beyond_first_cell(&late, &settings));

        let first_only = make_notebook(
            "nb.ipynb",
            &[
                code_cell("import os\nimport sys", Some(1)),
                code_cell("print(os.name)", Some(2)),
            ],
        );
        assert!(!imports_beyond_first_cell(&first_only, &settings));
    }

    #[test]
    fn imports_beyond_first_cell_inapplicable_on_invalid_syntax() {
        let settings = Settings::default();
        let nb = make_notebook(
            "nb.ipynb",
            &[
                code_cell("def broken(:", Some(1)),
                code_cell("import sys", Some(2)),
            ],
        );
        assert!(nb.has_invalid_syntax());
        assert!(!imports_beyond_first_cell(&nb, &settings));
    }

    #[test]
    fn missing_h1_heading() {
        let settings = Settings::default();

        let titled = make_notebook(
            "nb.ipynb",
            &[md_cell("# Analysis"), code_cell("x = 1", Some(1))],
        );
        assert!(!missing_h1_md_heading(&titled, &settings));

        let only_h2 = make_notebook(
            "nb.ipynb",
            &[md_cell("## Section"), code_cell("x = 1", Some(1))],
        );
        assert!(missing_h1_md_heading(&only_h2, &settings));

        // an H1 beyond the initial-cells window does not count
        let late_title = make_notebook(
            "nb.ipynb",
            &[
                code_cell("a = 1", Some(1)),
                code_cell("b = 2", Some(2)),
                code_cell("c = 3", Some(3)),
                md_cell("# Late title"),
            ],
        );
        assert!(missing_h1_md_heading(&late_title, &settings));
    }

    #[test]
    fn opening_and_closing_md_text() {
        let settings = Settings::default();

        let documented = make_notebook(
            "nb.ipynb",
            &[
                md_cell("# Title\n\nWe explore the dataset."),
                code_cell("x = 1", Some(1)),
                md_cell("We found nothing surprising."),
            ],
        );
        assert!(!missing_opening_md_text(&documented, &settings));
        assert!(!missing_closing_md_text(&documented, &settings));

        // heading-only markdown does not count as descriptive text
        let headings_only = make_notebook(
            "nb.ipynb",
            &[
                md_cell("# Title"),
                code_cell("x = 1", Some(1)),
                md_cell("## The End"),
            ],
        );
        assert!(missing_opening_md_text(&headings_only, &settings));
        assert!(missing_closing_md_text(&headings_only, &settings));
    }

    #[test]
    fn md_code_ratio() {
        let settings = Settings::default();

        // 2 markdown / 10 code = 0.2, below the default 0.3
        let mut cells = vec![md_cell("Intro."), md_cell("More prose.")];
        for i in 0..10i64 {
            cells.push(code_cell(&format!("x{i} = {i}"), Some(i + 1)));
        }
        let nb = make_notebook("nb.ipynb", &cells);
        assert!(too_few_md_cells(&nb, &settings));

        let mut relaxed = Settings::default();
        relaxed.min_md_code_ratio = 0.1;
        assert!(!too_few_md_cells(&nb, &relaxed));
    }

    #[test]
    fn md_code_ratio_vacuous_without_code_cells() {
        let settings = Settings::default();
        let nb = make_notebook("nb.ipynb", &[md_cell("# Only prose")]);
        assert!(!too_few_md_cells(&nb, &settings));
    }
}

mod cell_level_rules {
    use super::*;

    #[test]
    fn non_executed_and_empty_cells() {
        let settings = Settings::default();
        let nb = make_notebook(
            "nb.ipynb",
            &[
                code_cell("x = 1", None),
                code_cell("", None),
                code_cell("y = 2", Some(1)),
                md_cell("prose"),
            ],
        );

        assert_eq!(non_executed_cells(&nb, &settings), vec![0]);
        assert_eq!(empty_cells(&nb, &settings), vec![1]);
    }

    #[test]
    fn cells_too_long_uses_threshold() {
        let mut settings = Settings::default();
        settings.max_lines_in_code_cell = 3;

        let long_source = "a = 1\nb = 2\nc = 3\nd = 4";
        let nb = make_notebook(
            "nb.ipynb",
            &[
                code_cell("short = 1", Some(1)),
                code_cell(long_source, Some(2)),
            ],
        );
        assert_eq!(cells_too_long(&nb, &settings), vec![1]);
    }
}
