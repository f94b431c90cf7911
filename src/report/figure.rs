//! Grid plan of the report: which panel shows which subset, which curves it holds
//! and how they are styled. Pure data; drawing lives in `render`.

use log::debug;

use crate::{
    data::dataset::Dataset,
    report::palette::SeriesStyle,
    utils::{
        config::{GRID_COLUMNS, ReportConfig},
        error::{ReportError, Result},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelKey {
    pub dispatcher_type: String,
    pub with_balancing: String,
}

impl PanelKey {
    pub fn title(&self) -> String {
        format!(
            "with_balancing={},dispatcher_type={}",
            self.with_balancing, self.dispatcher_type
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub channel: String,
    pub with_select: String,
    pub style: SeriesStyle,
    /// `(threads, result)` sorted by thread count.
    pub points: Vec<(u32, f64)>,
}

impl Curve {
    pub fn label(&self) -> String {
        format!("channel={},with_select={}", self.channel, self.with_select)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    /// `None` for a grid cell with no matching withBalancing value.
    pub key: Option<PanelKey>,
    pub curves: Vec<Curve>,
}

impl Panel {
    pub fn is_empty(&self) -> bool {
        self.curves.iter().all(|c| c.points.is_empty())
    }

    /// Min and max result over every point of the panel.
    pub fn result_range(&self) -> Option<(f64, f64)> {
        self.curves
            .iter()
            .flat_map(|c| c.points.iter().map(|&(_, y)| y))
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries.
    pub panels: Vec<Panel>,
    /// Every distinct thread count of the dataset, ascending. Shared by all panels.
    pub x_ticks: Vec<u32>,
}

impl Figure {
    /// Lays out one row per dispatcher type and one column per withBalancing value.
    pub fn plan(dataset: &Dataset, config: &ReportConfig) -> Result<Self> {
        let dispatchers = dataset.dispatcher_types();
        if dispatchers.is_empty() {
            return Err(ReportError::EmptyDataset);
        }

        let balancing = dataset.balancing_values();
        if balancing.len() > GRID_COLUMNS {
            return Err(ReportError::TooManyBalancingValues {
                found: balancing.len(),
            });
        }

        let channels = dataset.channels();
        let selects = dataset.select_modes();

        let mut panels = Vec::with_capacity(dispatchers.len() * GRID_COLUMNS);
        for (row, dispatcher) in dispatchers.iter().enumerate() {
            for col in 0..GRID_COLUMNS {
                let Some(with_balancing) = balancing.get(col) else {
                    debug!("panel ({row}, {col}) left empty: no withBalancing value");
                    panels.push(Panel {
                        row,
                        col,
                        key: None,
                        curves: Vec::new(),
                    });
                    continue;
                };

                let mut curves = Vec::with_capacity(channels.len() * selects.len());
                for channel in &channels {
                    for with_select in &selects {
                        let style = SeriesStyle::at(curves.len(), config.palette_overflow)?;
                        let mut points: Vec<(u32, f64)> = dataset
                            .matching(dispatcher, with_balancing, channel, with_select)
                            .map(|r| (r.threads, r.result))
                            .collect();
                        points.sort_by_key(|&(threads, _)| threads);

                        curves.push(Curve {
                            channel: channel.clone(),
                            with_select: with_select.clone(),
                            style,
                            points,
                        });
                    }
                }

                let key = PanelKey {
                    dispatcher_type: dispatcher.clone(),
                    with_balancing: with_balancing.clone(),
                };
                debug!("panel ({row}, {col}) {}: {} curves", key.title(), curves.len());
                panels.push(Panel {
                    row,
                    col,
                    key: Some(key),
                    curves,
                });
            }
        }

        let mut x_ticks = dataset.threads();
        x_ticks.sort_unstable();

        Ok(Self {
            rows: dispatchers.len(),
            cols: GRID_COLUMNS,
            panels,
            x_ticks,
        })
    }

    /// Shared legend set, taken from the first panel only.
    pub fn legend_entries(&self) -> &[Curve] {
        self.panels
            .first()
            .map(|p| p.curves.as_slice())
            .unwrap_or_default()
    }

    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        self.panels.get(row * self.cols + col)
    }

    /// Dataset-wide thread range, used for every panel's x axis.
    pub fn thread_range(&self) -> (u32, u32) {
        let lo = self.x_ticks.first().copied().unwrap_or(1);
        let hi = self.x_ticks.last().copied().unwrap_or(lo);
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{locale::DecimalSeparator, record::ResultRow};
    use crate::report::palette::{COLOURS, Marker, PaletteOverflow};

    fn row(threads: u32, result: f64, d: &str, b: &str, c: &str, s: &str) -> ResultRow {
        ResultRow {
            threads,
            result,
            dispatcher_type: d.into(),
            with_balancing: b.into(),
            channel: c.into(),
            with_select: s.into(),
        }
    }

    fn full_grid() -> Dataset {
        let mut rows = Vec::new();
        for d in ["FORK_JOIN", "DEFAULT", "IO"] {
            for b in ["false", "true"] {
                for c in ["RENDEZVOUS", "BUFFERED_16"] {
                    for s in ["false", "true"] {
                        for t in [8, 1, 4, 2] {
                            rows.push(row(t, 100.0 / t as f64, d, b, c, s));
                        }
                    }
                }
            }
        }
        Dataset::new(rows)
    }

    #[test]
    fn panel_count_is_dispatchers_times_two() {
        let figure = Figure::plan(&full_grid(), &ReportConfig::default()).unwrap();
        assert_eq!(figure.rows, 3);
        assert_eq!(figure.cols, 2);
        assert_eq!(figure.panels.len(), 6);

        let panel = figure.panel(1, 1).unwrap();
        assert_eq!(
            panel.key.as_ref().unwrap().title(),
            "with_balancing=true,dispatcher_type=DEFAULT"
        );
        assert_eq!(panel.curves.len(), 4);
    }

    #[test]
    fn example_rows_become_one_curve() {
        let data = Dataset::new(vec![
            row(1, 120.0, "A", "true", "rendezvous", "false"),
            row(2, 65.0, "A", "true", "rendezvous", "false"),
        ]);
        let figure = Figure::plan(&data, &ReportConfig::default()).unwrap();

        let panel = figure.panel(0, 0).unwrap();
        assert_eq!(
            panel.key,
            Some(PanelKey {
                dispatcher_type: "A".into(),
                with_balancing: "true".into()
            })
        );
        assert_eq!(panel.curves.len(), 1);
        assert_eq!(panel.curves[0].label(), "channel=rendezvous,with_select=false");
        assert_eq!(panel.curves[0].points, vec![(1, 120.0), (2, 65.0)]);
    }

    #[test]
    fn single_balancing_value_leaves_second_column_empty() {
        let data = Dataset::new(vec![
            row(1, 120.0, "A", "true", "rendezvous", "false"),
            row(2, 65.0, "A", "true", "rendezvous", "false"),
        ]);
        let figure = Figure::plan(&data, &ReportConfig::default()).unwrap();

        assert_eq!(figure.panels.len(), 2);
        let empty = figure.panel(0, 1).unwrap();
        assert!(empty.key.is_none());
        assert!(empty.curves.is_empty());
        assert!(empty.is_empty());
    }

    #[test]
    fn missing_combination_does_not_shift_later_panels() {
        // dispatcher B never ran with balancing=true
        let data = Dataset::new(vec![
            row(1, 10.0, "A", "false", "R", "false"),
            row(1, 11.0, "A", "true", "R", "false"),
            row(1, 12.0, "B", "false", "R", "false"),
        ]);
        let figure = Figure::plan(&data, &ReportConfig::default()).unwrap();

        let b_true = figure.panel(1, 1).unwrap();
        assert_eq!(b_true.key.as_ref().unwrap().dispatcher_type, "B");
        assert_eq!(b_true.key.as_ref().unwrap().with_balancing, "true");
        assert!(b_true.is_empty());
        assert_eq!(figure.panel(1, 0).unwrap().curves[0].points, vec![(1, 12.0)]);
    }

    #[test]
    fn every_row_lands_in_exactly_one_curve() {
        let data = full_grid();
        let figure = Figure::plan(&data, &ReportConfig::default()).unwrap();

        let plotted: usize = figure
            .panels
            .iter()
            .flat_map(|p| p.curves.iter())
            .map(|c| c.points.len())
            .sum();
        assert_eq!(plotted, data.len());

        for panel in &figure.panels {
            let key = panel.key.as_ref().unwrap();
            for curve in &panel.curves {
                let mut expected: Vec<(u32, f64)> = data
                    .matching(
                        &key.dispatcher_type,
                        &key.with_balancing,
                        &curve.channel,
                        &curve.with_select,
                    )
                    .map(|r| (r.threads, r.result))
                    .collect();
                expected.sort_by_key(|&(t, _)| t);
                assert_eq!(curve.points, expected);
            }
        }
    }

    #[test]
    fn points_are_sorted_by_threads() {
        let figure = Figure::plan(&full_grid(), &ReportConfig::default()).unwrap();
        let threads: Vec<u32> = figure.panels[0].curves[0].points.iter().map(|p| p.0).collect();
        assert_eq!(threads, vec![1, 2, 4, 8]);
    }

    #[test]
    fn x_ticks_come_from_whole_dataset() {
        let data = Dataset::new(vec![
            row(64, 1.0, "A", "false", "R", "false"),
            row(1, 2.0, "A", "true", "R", "false"),
            row(4, 3.0, "B", "false", "R", "false"),
        ]);
        let figure = Figure::plan(&data, &ReportConfig::default()).unwrap();
        assert_eq!(figure.x_ticks, vec![1, 4, 64]);
        assert_eq!(figure.thread_range(), (1, 64));
    }

    #[test]
    fn styles_restart_per_panel() {
        let figure = Figure::plan(&full_grid(), &ReportConfig::default()).unwrap();
        for panel in &figure.panels {
            assert_eq!(panel.curves[0].style.colour, COLOURS[0]);
            assert_eq!(panel.curves[0].style.marker, Marker::Point);
            assert_eq!(panel.curves[3].style.marker, Marker::TriDown);
        }
    }

    #[test]
    fn legend_comes_from_first_panel() {
        let figure = Figure::plan(&full_grid(), &ReportConfig::default()).unwrap();
        let labels: Vec<String> = figure.legend_entries().iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "channel=RENDEZVOUS,with_select=false",
                "channel=RENDEZVOUS,with_select=true",
                "channel=BUFFERED_16,with_select=false",
                "channel=BUFFERED_16,with_select=true",
            ]
        );
    }

    #[test]
    fn layout_errors() {
        let empty = Dataset::from_reader(
            "threads,result,dispatcherType,withBalancing,channel,withSelect\n".as_bytes(),
            DecimalSeparator::Point,
        )
        .unwrap();
        assert!(matches!(
            Figure::plan(&empty, &ReportConfig::default()),
            Err(ReportError::EmptyDataset)
        ));

        let three = Dataset::new(vec![
            row(1, 1.0, "A", "true", "R", "false"),
            row(1, 1.0, "A", "false", "R", "false"),
            row(1, 1.0, "A", "maybe", "R", "false"),
        ]);
        assert!(matches!(
            Figure::plan(&three, &ReportConfig::default()),
            Err(ReportError::TooManyBalancingValues { found: 3 })
        ));
    }

    #[test]
    fn palette_overflow_policy_applies() {
        let rows: Vec<ResultRow> = (0..13)
            .map(|i| row(1, 1.0, "A", "true", &format!("C{i}"), "false"))
            .collect();
        let data = Dataset::new(rows);

        let mut config = ReportConfig::default();
        let figure = Figure::plan(&data, &config).unwrap();
        assert_eq!(figure.panels[0].curves[12].style.marker, Marker::Point);

        config.palette_overflow = PaletteOverflow::Fail;
        assert!(matches!(
            Figure::plan(&data, &config),
            Err(ReportError::PaletteExhausted { requested: 13, .. })
        ));
    }
}
