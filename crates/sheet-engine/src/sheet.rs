//! The grid container: owns every cell, tracks the printable bounding box,
//! and dispatches edits with cycle checking and transitive cache
//! invalidation.
//!
//! `set_cell`'s transaction shape is grounded on `gridline`'s
//! `src/core/ops.rs::set_cell_from_input` (tentatively insert, cycle-check,
//! restore-or-commit) and on `original_source/cell.cpp`'s
//! `ProcessSetFormulaCell`, with two corrections over the latter (see
//! `DESIGN.md`): forward-referenced cells with no prior entry are
//! materialized at write time so they have somewhere to record the new
//! backward edge, and `clear_cell` never drops a cell's own
//! `backward_deps` by removing its map entry.

use crate::cell::{Cell, Content};
use crate::cycle;
use crate::error::{EditError, Result};
use crate::value::Value;
use sheet_formula::{ErrorKind, Formula, Position, Size};
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

#[derive(Default)]
pub struct Sheet {
    cells: HashMap<Position, Cell>,
    row_counts: HashMap<i32, i32>,
    col_counts: HashMap<i32, i32>,
}

impl Sheet {
    pub fn new() -> Self {
        Sheet::default()
    }

    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        if !pos.is_valid() {
            return Err(EditError::InvalidPosition);
        }

        let new_content = parse_content(text)?;
        let mut new_forward: Vec<Position> = match &new_content {
            Content::Formula(f) => f.referenced_cells().to_vec(),
            _ => Vec::new(),
        };
        new_forward.sort();
        new_forward.dedup();

        self.invalidate_dependents(pos);

        let existed_before = self.cells.contains_key(&pos);
        let (old_content, old_forward) = match self.cells.get(&pos) {
            Some(cell) => (cell.content.clone(), cell.forward_deps.clone()),
            None => (Content::Empty, Vec::new()),
        };

        {
            let cell = self.cells.entry(pos).or_insert_with(|| Cell::empty(pos));
            cell.content = new_content.clone();
            cell.forward_deps = new_forward.clone();
        }

        if matches!(new_content, Content::Formula(_)) && cycle::has_cycle_from(pos, &self.cells) {
            if existed_before {
                if let Some(cell) = self.cells.get_mut(&pos) {
                    cell.content = old_content;
                    cell.forward_deps = old_forward;
                }
            } else {
                self.cells.remove(&pos);
            }
            return Err(EditError::CircularDependency);
        }

        for old_dep in &old_forward {
            if let Some(neighbor) = self.cells.get_mut(old_dep) {
                Cell::remove_sorted(&mut neighbor.backward_deps, pos);
            }
        }
        for &new_dep in &new_forward {
            let neighbor = self
                .cells
                .entry(new_dep)
                .or_insert_with(|| Cell::empty(new_dep));
            Cell::insert_sorted_unique(&mut neighbor.backward_deps, pos);
        }

        let was_empty = old_content.is_empty();
        let is_empty = new_content.is_empty();
        if was_empty != is_empty {
            self.note_content_change(pos, is_empty);
        }

        Ok(())
    }

    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        if !pos.is_valid() {
            return Err(EditError::InvalidPosition);
        }
        self.invalidate_dependents(pos);

        let had_content = self
            .cells
            .get(&pos)
            .map(|cell| !cell.content.is_empty())
            .unwrap_or(false);
        if !had_content {
            return Ok(());
        }

        let old_forward = self.cells.get(&pos).unwrap().forward_deps.clone();
        for dep in &old_forward {
            if let Some(neighbor) = self.cells.get_mut(dep) {
                Cell::remove_sorted(&mut neighbor.backward_deps, pos);
            }
        }

        let cell = self.cells.get_mut(&pos).unwrap();
        cell.content = Content::Empty;
        cell.forward_deps.clear();
        self.note_content_change(pos, true);

        Ok(())
    }

    pub fn get_cell(&self, pos: Position) -> Option<CellHandle<'_>> {
        let size = self.get_printable_size();
        if pos.row < 0 || pos.col < 0 || pos.row >= size.rows || pos.col >= size.cols {
            return None;
        }
        self.cells.get(&pos).map(|cell| CellHandle {
            sheet: self,
            cell,
        })
    }

    pub fn get_printable_size(&self) -> Size {
        let rows = self.row_counts.keys().copied().max().map(|r| r + 1).unwrap_or(0);
        let cols = self.col_counts.keys().copied().max().map(|c| c + 1).unwrap_or(0);
        Size::new(rows, cols)
    }

    pub fn print_values(&self, out: &mut impl Write) -> io::Result<()> {
        self.print_rows(out, true)
    }

    pub fn print_texts(&self, out: &mut impl Write) -> io::Result<()> {
        self.print_rows(out, false)
    }

    fn print_rows(&self, out: &mut impl Write, values: bool) -> io::Result<()> {
        let size = self.get_printable_size();
        for row in 0..size.rows {
            let mut row_text: Vec<String> = Vec::with_capacity(size.cols as usize);
            for col in 0..size.cols {
                let pos = Position::new(row, col);
                let text = match self.cells.get(&pos) {
                    None => String::new(),
                    Some(cell) => {
                        if values {
                            self.value_of(cell).to_string()
                        } else {
                            cell.get_text()
                        }
                    }
                };
                row_text.push(text);
            }
            while row_text.last().map(|s| s.is_empty()).unwrap_or(false) {
                row_text.pop();
            }
            writeln!(out, "{}", row_text.join("\t"))?;
        }
        Ok(())
    }

    fn note_content_change(&mut self, pos: Position, is_now_empty: bool) {
        let delta: i32 = if is_now_empty { -1 } else { 1 };

        let row_count = {
            let c = self.row_counts.entry(pos.row).or_insert(0);
            *c += delta;
            *c
        };
        if row_count <= 0 {
            self.row_counts.remove(&pos.row);
        }

        let col_count = {
            let c = self.col_counts.entry(pos.col).or_insert(0);
            *c += delta;
            *c
        };
        if col_count <= 0 {
            self.col_counts.remove(&pos.col);
        }
    }

    /// Invalidates the cache of `start` and every cell transitively
    /// reachable from it along backward edges (its dependents). Takes
    /// `&self` since the cache lives behind interior mutability — see
    /// `Cell`'s doc comment.
    fn invalidate_dependents(&self, start: Position) {
        let mut stack = vec![start];
        let mut visited = HashSet::new();
        while let Some(p) = stack.pop() {
            if !visited.insert(p) {
                continue;
            }
            if let Some(cell) = self.cells.get(&p) {
                cell.invalidate_cache();
                for &dep in &cell.backward_deps {
                    stack.push(dep);
                }
            }
        }
    }

    fn value_of(&self, cell: &Cell) -> Value {
        match &cell.content {
            Content::Empty => Value::Text(String::new()),
            Content::Text(s) => Value::Text(display_text(s).to_string()),
            Content::Formula(f) => match self.eval_formula_cached(cell, f) {
                Ok(v) => Value::Number(v),
                Err(k) => Value::Error(k),
            },
        }
    }

    fn eval_formula_cached(&self, cell: &Cell, formula: &Formula) -> std::result::Result<f64, ErrorKind> {
        if let Some(v) = cell.cached_value() {
            return Ok(v);
        }
        let v = formula.evaluate(&mut |p| self.resolve_ref(p))?;
        cell.set_cached_value(v);
        Ok(v)
    }

    /// The lookup formula evaluation resolves `Ref` leaves through. An
    /// absent cell reads as `0.0` without materializing anything in the
    /// grid — see `DESIGN.md`'s Open Question resolution.
    fn resolve_ref(&self, pos: Position) -> std::result::Result<f64, ErrorKind> {
        if !pos.is_valid() {
            return Err(ErrorKind::Ref);
        }
        match self.cells.get(&pos) {
            None => Ok(0.0),
            Some(cell) => match &cell.content {
                Content::Empty => Ok(0.0),
                Content::Text(s) => {
                    let displayed = display_text(s);
                    if displayed.is_empty() {
                        Ok(0.0)
                    } else {
                        displayed.parse::<f64>().map_err(|_| ErrorKind::Value)
                    }
                }
                Content::Formula(f) => self.eval_formula_cached(cell, f),
            },
        }
    }
}

fn parse_content(text: &str) -> Result<Content> {
    if text.is_empty() {
        return Ok(Content::Empty);
    }
    if text.starts_with('=') && text.len() > 1 {
        let formula = Formula::parse(&text[1..]).map_err(|e| EditError::FormulaParse(e.message))?;
        return Ok(Content::Formula(formula));
    }
    Ok(Content::Text(text.to_string()))
}

fn display_text(s: &str) -> &str {
    s.strip_prefix('\'').unwrap_or(s)
}

/// A read-only view onto a materialized cell, borrowed from the owning
/// `Sheet` so value computation can reach neighbors.
pub struct CellHandle<'a> {
    sheet: &'a Sheet,
    cell: &'a Cell,
}

impl<'a> CellHandle<'a> {
    pub fn get_value(&self) -> Value {
        self.sheet.value_of(self.cell)
    }

    pub fn get_text(&self) -> String {
        self.cell.get_text()
    }

    pub fn get_referenced_cells(&self) -> &[Position] {
        self.cell.get_referenced_cells()
    }

    pub fn is_referenced(&self) -> bool {
        self.cell.is_referenced()
    }

    pub fn position(&self) -> Position {
        self.cell.position()
    }
}
