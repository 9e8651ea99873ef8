//! Interactive collection of plotting parameters.
//!
//! Each collector keeps asking until the whole entry validates; `list` shows
//! the valid choices. The only way out of a collector other than valid input
//! is closing stdin, which is reported as an error.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;

use crate::selection::{
    dedup_in_order, is_list_request, split_tokens, validate_datetimes, validate_tokens,
    SelectionError, TimeBase,
};

const VARIABLES_QUESTION: &str = "\nWhich variables would you like to plot against time? To see a list of possible variables, enter 'list'. Please note that not entering the variable name as it appears within the file or OPeNDAP webform will result in errors.\n\n";
const VARIABLES_AFTER_LIST: &str = "\n\nEnter variable(s) to plot separated by commas:\n";

const VARIABLE_QUESTION: &str = "\nWhich variable would you like to plot against space? To see a list of possible variables, enter 'list'. Please note that not entering the variable name as it appears within the file or OPeNDAP webform will result in errors.\n\n";
const VARIABLE_AFTER_LIST: &str = "\n\nEnter variable to plot:\n";

const STATIONS_QUESTION: &str = "\nWhich stations would you like to create plots for? Enter station name(s) separated by commas. The stations are named with the following convention: \n\nnetwork_name-platform_name\n\nTo see a list of possible stations, enter 'list'. Please note that not entering the station name as it appears within the file will result in errors.\n\n";
const STATIONS_AFTER_LIST: &str = "\n\nEnter stations(s) to plot separated by commas:\n";

const TIME_BASE_QUESTION: &str = "\nWould you like to use nominal time or actual time for the plots? Enter nominal or actual. \nPlease note that using nominal time will result in more data points at each time for the plot.\n\n";

const DATETIMES_QUESTION: &str = "\nWhich time(s) would you like to create 3D plots for? Enter UTC datetimes separated by commas. Please enter the dates and times (UTC) with the following convention: \n\nYYYY/mm/dd-HH:MM  where YYYY = year, mm = month, dd = day, HH = hour, MM = minutes.\n\nTo see a list of possible times, enter 'list'. Please note that not entering the date and times as they appear within the file will result in errors.\n\n";
const DATETIMES_AFTER_LIST: &str = "\n\nEnter date/time(s) to plot separated by commas:\n";

/// A line-oriented conversation with the operator.
pub trait Prompt {
    /// Shows `question` and returns the answer without its line ending.
    fn ask(&mut self, question: &str) -> Result<String>;
    fn say(&mut self, message: &str) -> Result<()>;
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow!("Input closed before a valid answer was entered"));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Asks for one or more variables to plot against time.
pub fn collect_variables(prompt: &mut impl Prompt, plottable: &[String]) -> Result<Vec<String>> {
    let mut question = VARIABLES_QUESTION;

    loop {
        let input = prompt.ask(question)?;
        if is_list_request(&input) {
            prompt.say(&format!(
                "\nThis file has the following variables available to plot against time: \n\n{}",
                plottable.join(", ")
            ))?;
            question = VARIABLES_AFTER_LIST;
            continue;
        }

        match validate_tokens(split_tokens(&input), plottable) {
            Ok(variables) => return Ok(dedup_in_order(variables)),
            Err(err) => {
                report(prompt, &err, "Invalid variable entered: ", "")?;
                prompt.say("Please enter your variables again.\n")?;
                question = VARIABLES_QUESTION;
            }
        }
    }
}

/// Asks for one or more `network-platform` stations.
pub fn collect_stations(prompt: &mut impl Prompt, stations: &[String]) -> Result<Vec<String>> {
    let mut question = STATIONS_QUESTION;

    loop {
        let input = prompt.ask(question)?;
        if is_list_request(&input) {
            prompt.say(&format!(
                "\nThe following stations are available to create plots for: \n\n{}",
                stations.join(", ")
            ))?;
            question = STATIONS_AFTER_LIST;
            continue;
        }

        match validate_tokens(split_tokens(&input), stations) {
            Ok(selected) => return Ok(dedup_in_order(selected)),
            Err(err) => {
                report(prompt, &err, "Invalid station entered: ", "")?;
                prompt.say("Please try again:\n")?;
                question = STATIONS_QUESTION;
            }
        }
    }
}

/// Asks for a single variable to plot against space.
pub fn collect_variable(prompt: &mut impl Prompt, plottable: &[String]) -> Result<String> {
    let mut question = VARIABLE_QUESTION;

    loop {
        let input = prompt.ask(question)?;
        if is_list_request(&input) {
            prompt.say(&format!(
                "\nThis file has the following variables available to plot against space: \n\n{}",
                plottable.join(", ")
            ))?;
            question = VARIABLE_AFTER_LIST;
            continue;
        }

        match validate_tokens(vec![input.trim().to_string()], plottable) {
            Ok(mut variables) => return Ok(variables.remove(0)),
            Err(_) => {
                prompt.say("\nInvalid variable entered. Please enter your variable again.\n")?;
                question = VARIABLE_QUESTION;
            }
        }
    }
}

pub fn collect_time_base(prompt: &mut impl Prompt) -> Result<TimeBase> {
    loop {
        let input = prompt.ask(TIME_BASE_QUESTION)?;
        match input.parse::<TimeBase>() {
            Ok(base) => return Ok(base),
            Err(_) => prompt.say(&format!(
                "Invalid answer entered: {}  Please try again.\n",
                input
            ))?,
        }
    }
}

/// Asks for datetimes typed in `format`, each of which must be `eligible`.
pub fn collect_datetimes(
    prompt: &mut impl Prompt,
    eligible: &[NaiveDateTime],
    format: &str,
) -> Result<Vec<NaiveDateTime>> {
    let mut question = DATETIMES_QUESTION;

    loop {
        let input = prompt.ask(question)?;
        if is_list_request(&input) {
            let listing: Vec<String> = eligible
                .iter()
                .map(|dt| dt.format(format).to_string())
                .collect();
            prompt.say(&format!(
                "\nThe following date-times are available to create plots for: \n\n{}",
                listing.join("\n")
            ))?;
            question = DATETIMES_AFTER_LIST;
            continue;
        }

        match validate_datetimes(split_tokens(&input), eligible, format) {
            Ok(selected) => return Ok(selected),
            Err(err) => {
                report(prompt, &err, "\n\nInvalid time entered: ", ".")?;
                prompt.say("Please try again:\n")?;
                question = DATETIMES_QUESTION;
            }
        }
    }
}

/// Asks for the label of `axis`.
pub fn collect_label(prompt: &mut impl Prompt, axis: &str) -> Result<String> {
    prompt.ask(&format!(
        "\n\nWhat would you like the label to be on the {}-axis?\n",
        axis
    ))
}

fn report(
    prompt: &mut impl Prompt,
    err: &SelectionError,
    prefix: &str,
    suffix: &str,
) -> Result<()> {
    for token in err.tokens() {
        prompt.say(&format!("{}{}{}\n", prefix, token, suffix))?;
    }
    Ok(())
}

// -- Tests -------------------------------------------------------------------
