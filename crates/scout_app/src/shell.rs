//! Interactive session: one command per line, results rendered as they land.
//!
//! Input is only read while no request is in flight, so piped scripts such
//! as `search rust` followed by `more` behave the same as typed sessions.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::bail;
use scout_core::{
    update, AppState, DatePosted, JobTypeFilter, LocationType, Msg, PageSize, Query, SavedSort,
};
use scout_engine::{Html2MdConverter, KeyValueStore, SavedJobsStore};
use scout_logging::{scout_info, scout_warn};

use crate::effects::EffectRunner;
use crate::render::{render_details, render_results, render_saved};

const HELP: &str = "\
commands:
  search [words...]        new search (empty uses the default term)
  more                     fetch the next page
  retry                    repeat the last failed request
  show <n>                 details for result n
  close                    close details
  save <n>                 save result n
  unsave <id>              remove a saved job
  saved [date|company|title]
  location [text]          set or clear the location
  filters                  show filters
  filters job-type|date|where|size <value>
  filters clear
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    JobType(JobTypeFilter),
    DatePosted(DatePosted),
    LocationType(LocationType),
    PageSize(PageSize),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    More,
    Retry,
    Show(usize),
    Close,
    Save(usize),
    Unsave(String),
    Saved(SavedSort),
    Location(Option<String>),
    ShowFilters,
    Filter(FilterChange),
    Help,
    Quit,
}

fn index_arg(rest: &str) -> Result<usize, String> {
    rest.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("expected a result number, got {:?}", rest.trim()))
}

fn parse_filter(rest: &str) -> Result<ShellCommand, String> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(ShellCommand::ShowFilters);
    }
    let (name, value) = rest.split_once(' ').unwrap_or((rest, ""));
    let change = match name {
        "clear" => FilterChange::Clear,
        "job-type" | "type" => FilterChange::JobType(value.parse().map_err(|e| format!("{e}"))?),
        "date" | "date-posted" => {
            FilterChange::DatePosted(value.parse().map_err(|e| format!("{e}"))?)
        }
        "where" | "location-type" => {
            FilterChange::LocationType(value.parse().map_err(|e| format!("{e}"))?)
        }
        "size" | "page-size" => FilterChange::PageSize(value.parse().map_err(|e| format!("{e}"))?),
        other => return Err(format!("unknown filter {other:?}")),
    };
    Ok(ShellCommand::Filter(change))
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        match word {
            "search" | "s" => Ok(ShellCommand::Search(rest.trim().to_string())),
            "more" | "m" => Ok(ShellCommand::More),
            "retry" => Ok(ShellCommand::Retry),
            "show" => index_arg(rest).map(ShellCommand::Show),
            "close" => Ok(ShellCommand::Close),
            "save" => index_arg(rest).map(ShellCommand::Save),
            "unsave" => match rest.trim() {
                "" => Err("expected a listing id".to_string()),
                id => Ok(ShellCommand::Unsave(id.to_string())),
            },
            "saved" => match rest.trim() {
                "" => Ok(ShellCommand::Saved(SavedSort::default())),
                order => order
                    .parse()
                    .map(ShellCommand::Saved)
                    .map_err(|e| format!("{e}")),
            },
            "location" => match rest.trim() {
                "" => Ok(ShellCommand::Location(None)),
                place => Ok(ShellCommand::Location(Some(place.to_string()))),
            },
            "filters" | "filter" => parse_filter(rest),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command {other:?}; type `help`")),
        }
    }
}

pub struct Shell<'a, S: KeyValueStore, W: Write> {
    runner: EffectRunner,
    store: &'a mut SavedJobsStore<S>,
    out: W,
    state: AppState,
    draft: Query,
    awaiting_details: bool,
    converter: Html2MdConverter,
}

impl<'a, S: KeyValueStore, W: Write> Shell<'a, S, W> {
    pub fn new(
        runner: EffectRunner,
        store: &'a mut SavedJobsStore<S>,
        state: AppState,
        out: W,
    ) -> Self {
        Self {
            runner,
            store,
            out,
            state,
            draft: Query::default(),
            awaiting_details: false,
            converter: Html2MdConverter,
        }
    }

    pub fn run(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        writeln!(self.out, "Type `help` for commands.")?;
        let mut lines = input.lines();
        loop {
            self.settle()?;
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.handle(command)?,
                Err(message) => writeln!(self.out, "{message}")?,
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn busy(&self) -> bool {
        self.state.is_loading() || self.state.is_loading_more() || self.awaiting_details
    }

    /// Applies engine events until nothing is in flight.
    pub fn settle(&mut self) -> anyhow::Result<()> {
        for msg in self.runner.poll() {
            self.dispatch(msg)?;
        }
        while self.busy() {
            let Some(msg) = self.runner.wait() else {
                bail!("engine stopped responding");
            };
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        if matches!(msg, Msg::DetailsLoaded { .. }) {
            self.awaiting_details = false;
        }
        let state = std::mem::take(&mut self.state);
        let mut state = self.runner.apply(state, msg);
        let dirty = state.consume_dirty();
        self.state = state;
        if dirty {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let view = self.state.view();
        let text = if let Some(listing) = &view.details {
            render_details(listing, &self.converter)
        } else if let Some(error) = &view.details_error {
            format!("Details unavailable: {error}\n")
        } else if self.awaiting_details {
            "Loading details...\n".to_string()
        } else {
            let store = &*self.store;
            render_results(&view, |id| store.is_saved(id))
        };
        write!(self.out, "{text}")?;
        Ok(())
    }

    pub fn handle(&mut self, command: ShellCommand) -> anyhow::Result<()> {
        scout_info!("Shell command {:?}", command);
        match command {
            ShellCommand::Search(term) => {
                self.leave_details();
                self.draft.term = term;
                self.dispatch(Msg::SearchSubmitted(self.draft.clone()))?;
            }
            ShellCommand::More => {
                self.leave_details();
                if self.state.can_load_more() {
                    self.dispatch(Msg::LoadMoreRequested)?;
                } else if self.state.is_exhausted() {
                    writeln!(self.out, "No more results.")?;
                } else {
                    writeln!(self.out, "Nothing to load; run `search` first.")?;
                }
            }
            ShellCommand::Retry => {
                if self.state.error().is_some() {
                    self.dispatch(Msg::RetryClicked)?;
                } else {
                    writeln!(self.out, "Nothing to retry.")?;
                }
            }
            ShellCommand::Show(n) => match self.state.listings().get(n - 1) {
                Some(listing) => {
                    let id = listing.id.clone();
                    self.awaiting_details = true;
                    self.dispatch(Msg::DetailsRequested(id))?;
                }
                None => writeln!(self.out, "No result {n}.")?,
            },
            ShellCommand::Close => self.dispatch(Msg::DetailsClosed)?,
            ShellCommand::Save(n) => self.save(n)?,
            ShellCommand::Unsave(id) => match self.store.unsave(&id) {
                Ok(true) => writeln!(self.out, "Removed {id}.")?,
                Ok(false) => writeln!(self.out, "{id} was not saved.")?,
                Err(err) => writeln!(self.out, "Could not update saved jobs: {err}")?,
            },
            ShellCommand::Saved(order) => {
                let text = render_saved(&self.store.sorted(order));
                write!(self.out, "{text}")?;
            }
            ShellCommand::Location(place) => {
                self.draft.location = place;
                self.refine()?;
            }
            ShellCommand::ShowFilters => self.print_filters()?,
            ShellCommand::Filter(change) => {
                let filters = &mut self.draft.filters;
                match change {
                    FilterChange::JobType(value) => filters.job_type = value,
                    FilterChange::DatePosted(value) => filters.date_posted = value,
                    FilterChange::LocationType(value) => filters.location_type = value,
                    FilterChange::PageSize(value) => filters.page_size = value,
                    FilterChange::Clear => *filters = Default::default(),
                }
                self.refine()?;
            }
            ShellCommand::Help => writeln!(self.out, "{HELP}")?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    /// Re-runs the active search with the edited draft; unchanged requests
    /// are ignored by `update`.
    fn refine(&mut self) -> anyhow::Result<()> {
        self.leave_details();
        match self.state.query() {
            Some(active) => {
                let mut query = self.draft.clone();
                query.term = active.term.clone();
                self.draft = query.clone();
                self.dispatch(Msg::QueryChanged(query))
            }
            None => self.print_filters(),
        }
    }

    /// Drops any open details so the next render shows the results list.
    fn leave_details(&mut self) {
        if self.state.details().is_some() || self.state.details_error().is_some() {
            let state = std::mem::take(&mut self.state);
            let (state, _) = update(state, Msg::DetailsClosed);
            self.state = state;
        }
    }

    fn print_filters(&mut self) -> anyhow::Result<()> {
        let filters = self.draft.filters;
        writeln!(
            self.out,
            "location={} job-type={:?} date={:?} where={:?} size={}",
            self.draft.location.as_deref().unwrap_or("-"),
            filters.job_type,
            filters.date_posted,
            filters.location_type,
            filters.page_size.results()
        )?;
        Ok(())
    }

    fn save(&mut self, n: usize) -> anyhow::Result<()> {
        let Some(listing) = self.state.listings().get(n - 1) else {
            writeln!(self.out, "No result {n}.")?;
            return Ok(());
        };
        // Prefer the richer details record when it is the one on screen.
        let listing = match self.state.details() {
            Some(details) if details.id == listing.id => details.clone(),
            _ => listing.clone(),
        };
        let id = listing.id.clone();
        match self.store.save(listing) {
            Ok(true) => writeln!(self.out, "Saved {id}.")?,
            Ok(false) => writeln!(self.out, "{id} is already saved.")?,
            Err(err) => {
                scout_warn!("Saving {} failed: {}", id, err);
                writeln!(self.out, "Could not save {id}: {err}")?;
            }
        }
        Ok(())
    }
}
