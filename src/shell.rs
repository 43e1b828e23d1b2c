//! The interactive text menu.
//!
//! The shell owns all prompting and re-prompting. It reads lines from any
//! [BufRead] and writes to any [Write], which lets tests script a session.
//! Running out of input ends the session like choosing "Exit".

use std::io::{self, BufRead, Write};

use crate::{
    Error,
    bank::{BankDirectory, BankFilter, BankName},
    export::{DEFAULT_EXPORT_FILE_NAME, export_path, export_records},
    record::{
        LATEST_RECORDS_LIMIT, Record, RecordFields, Summary, parse_reference_input,
        resolve_bank_input,
    },
    reference::normalize,
    store::RecordStore,
    timezone::Clock,
    validation::{parse_date, parse_record_id},
};

/// Drives the menus on top of a [RecordStore].
pub struct Shell<R, W> {
    store: RecordStore,
    clock: Box<dyn Clock>,
    recent_limit: u32,
    input: R,
    output: W,
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell.
    ///
    /// `recent_limit` is the number of recent records in the summary report.
    pub fn new(
        store: RecordStore,
        clock: Box<dyn Clock>,
        recent_limit: u32,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            clock,
            recent_limit,
            input,
            output,
        }
    }

    /// Run the main menu until the user exits or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn run(&mut self) -> io::Result<()> {
        match self.main_menu() {
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::info!("input closed, exiting");
                writeln!(self.output)?;
                Ok(())
            }
            result => result,
        }
    }

    fn main_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "=".repeat(50))?;
        writeln!(self.output, "    TRANSACTION MANAGEMENT SYSTEM")?;
        writeln!(self.output, "{}", "=".repeat(50))?;

        loop {
            writeln!(self.output, "\n=== MAIN MENU ===")?;
            writeln!(self.output, "1. Add Transaction")?;
            writeln!(self.output, "2. View Records")?;
            writeln!(self.output, "3. Edit Record")?;
            writeln!(self.output, "4. Generate Reports")?;
            writeln!(self.output, "5. Export to CSV")?;
            writeln!(self.output, "6. View latest {LATEST_RECORDS_LIMIT} records")?;
            writeln!(self.output, "0. Exit")?;

            match self.prompt("\nSelect option (0-6): ")?.as_str() {
                "1" => self.add_record()?,
                "2" => self.view_records()?,
                "3" => self.edit_records()?,
                "4" => self.reports()?,
                "5" => self.export()?,
                "6" => self.summary(LATEST_RECORDS_LIMIT)?,
                "0" => {
                    writeln!(self.output, "\nThank you for using Transaction Management System!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option. Please select 0-6.")?,
            }
        }
    }

    // ========================================================================
    // INPUT HELPERS
    // ========================================================================

    /// Print `text` and read one trimmed line.
    fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }

        Ok(line.trim().to_owned())
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(is_yes(&self.prompt(question)?))
    }

    fn report_error(&mut self, error: &Error) -> io::Result<()> {
        writeln!(self.output, "Error: {error}")
    }

    // ========================================================================
    // OUTPUT HELPERS
    // ========================================================================

    fn show_records(&mut self, records: &[Record], title: &str) -> io::Result<()> {
        if records.is_empty() {
            return writeln!(self.output, "\nNo {} found.", title.to_lowercase());
        }

        writeln!(self.output, "\n=== {} ===", title.to_uppercase())?;
        self.write_table(records)?;
        writeln!(self.output, "\nTotal records: {}", records.len())
    }

    fn write_table(&mut self, records: &[Record]) -> io::Result<()> {
        writeln!(
            self.output,
            "{:<5} {:<12} {:<32} {:<12}",
            "ID", "Reference", "Bank Name", "Date"
        )?;
        writeln!(self.output, "{}", "-".repeat(64))?;

        for record in records {
            writeln!(
                self.output,
                "{:<5} {:<12} {:<32} {:<12}",
                record.id,
                record.reference.as_ref(),
                record.bank.as_ref(),
                record.date.to_string()
            )?;
        }

        Ok(())
    }

    fn show_query(&mut self, result: Result<Vec<Record>, Error>, title: &str) -> io::Result<()> {
        match result {
            Ok(records) => self.show_records(&records, title),
            Err(error) => self.report_error(&error),
        }
    }

    // ========================================================================
    // ADD
    // ========================================================================

    fn add_record(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== ADD NEW TRANSACTION ===")?;

        let reference = loop {
            let raw = self.prompt("Enter a number (e.g., 453, 4561, 10245): ")?;
            if raw.is_empty() {
                writeln!(self.output, "Please enter a valid number.")?;
                continue;
            }

            match normalize(&raw) {
                Ok(reference) => {
                    writeln!(self.output, "Generated reference number: {reference}")?;
                    break reference;
                }
                Err(error) => self.report_error(&error)?,
            }
        };

        let bank = loop {
            let codes = BankDirectory::codes().join(", ");
            writeln!(self.output, "\nSupported bank codes: {codes}")?;
            let raw = self.prompt("Enter bank short code: ")?;
            if raw.is_empty() {
                writeln!(self.output, "Please enter a valid bank code.")?;
                continue;
            }

            match BankDirectory::resolve_code(&raw) {
                Ok(bank) => {
                    writeln!(self.output, "Bank name: {bank}")?;
                    break bank;
                }
                Err(error) => self.report_error(&error)?,
            }
        };

        let today = self.clock.today();
        let date = loop {
            match self.prompt("\nUse current date? (y/n): ")?.to_lowercase().as_str() {
                "y" | "yes" => {
                    writeln!(self.output, "Using current date: {today}")?;
                    break today;
                }
                "n" | "no" => {
                    let raw = self.prompt("Enter custom date (YYYY-MM-DD): ")?;
                    match parse_date(&raw, today) {
                        Ok(date) => break date,
                        Err(error) => self.report_error(&error)?,
                    }
                }
                _ => writeln!(self.output, "Please enter 'y' for yes or 'n' for no.")?,
            }
        };

        let fields = RecordFields::new(reference, bank, date);
        match self.store.create(&fields, today) {
            Ok(id) => {
                writeln!(self.output, "\nTransaction saved successfully! (ID {id})")?;
                writeln!(self.output, "  Reference: {}", fields.reference)?;
                writeln!(self.output, "  Bank: {}", fields.bank)?;
                writeln!(self.output, "  Date: {}", fields.date)
            }
            Err(error) => self.report_error(&error),
        }
    }

    // ========================================================================
    // VIEW
    // ========================================================================

    fn view_records(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n=== VIEW RECORDS ===")?;
            writeln!(self.output, "1. View all records")?;
            writeln!(self.output, "2. Filter by reference number")?;
            writeln!(self.output, "3. Filter by bank name")?;
            writeln!(self.output, "4. Filter by date")?;
            writeln!(self.output, "0. Back to Main Menu")?;

            match self.prompt("\nSelect option (0-4): ")?.as_str() {
                "1" => {
                    let result = self.store.get_all();
                    self.show_query(result, "All Records")?;
                }
                "2" => {
                    let text = self
                        .prompt("Enter reference number to search: ")?
                        .to_uppercase();
                    let result = self.store.filter_by_reference_substring(&text);
                    self.show_query(result, &format!("Records matching '{text}'"))?;
                }
                "3" => self.filter_by_bank()?,
                "4" => {
                    let raw = self.prompt("Enter date (YYYY-MM-DD): ")?;
                    let result = self.store.filter_by_date(&raw, self.clock.today());
                    self.show_query(result, &format!("Records for {raw}"))?;
                }
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option selected.")?,
            }
        }
    }

    fn filter_by_bank(&mut self) -> io::Result<()> {
        let codes = BankDirectory::codes().join(", ");
        writeln!(self.output, "\nAvailable bank codes: {codes}")?;
        writeln!(self.output, "You can enter:")?;
        writeln!(self.output, "- Full bank name (e.g., 'PRIME COMMERCIAL BANK')")?;
        writeln!(self.output, "- Partial bank name (e.g., 'PRIME', 'COMMERCIAL')")?;
        writeln!(self.output, "- Bank code (e.g., 'PCBL', 'GBBL', 'EPF')")?;

        let input = self.prompt("\nEnter bank code, full name, or partial name: ")?;
        if input.is_empty() {
            return writeln!(self.output, "Please enter a valid input.");
        }

        let filter = BankDirectory::bank_filter(&input);
        let title = match &filter {
            BankFilter::ExactMatch(name) => {
                format!("Records matching bank code '{}' ({name})", input.to_uppercase())
            }
            BankFilter::SubstringMatch(text) => format!("Records matching '{text}'"),
        };

        let result = self.store.filter_by_bank_filter(&filter);
        self.show_query(result, &title)
    }

    // ========================================================================
    // REPORTS
    // ========================================================================

    fn reports(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n=== GENERATE REPORTS ===")?;
            writeln!(self.output, "1. Date range report")?;
            writeln!(self.output, "2. Bank-specific report")?;
            writeln!(self.output, "3. Reference number report")?;
            writeln!(self.output, "4. Summary report")?;
            writeln!(self.output, "0. Back to Main Menu")?;

            match self.prompt("\nSelect report type (0-4): ")?.as_str() {
                "1" => self.date_range_report()?,
                "2" => self.bank_report()?,
                "3" => {
                    let raw = self.prompt("Enter reference number: ")?;
                    let result = self.store.get_by_reference_exact(&raw);
                    self.show_query(result, &format!("Transaction details for '{raw}'"))?;
                }
                "4" => self.summary(self.recent_limit)?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option selected.")?,
            }
        }
    }

    fn date_range_report(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== DATE RANGE REPORT ===")?;
        let today = self.clock.today();

        let start = self.prompt("Enter start date (YYYY-MM-DD): ")?;
        if let Err(error) = parse_date(&start, today) {
            return self.report_error(&error);
        }

        let end = self.prompt("Enter end date (YYYY-MM-DD): ")?;
        let result = self.store.filter_by_date_range(&start, &end, today);
        self.show_query(result, &format!("Transactions from {start} to {end}"))
    }

    /// Codes are expanded to their name, but the report always matches names
    /// loosely.
    fn bank_report(&mut self) -> io::Result<()> {
        let names = BankDirectory::names().join(", ");
        writeln!(self.output, "\nSupported banks: {names}")?;
        let input = self.prompt("Enter bank name or code: ")?;

        let text = match BankDirectory::resolve_code(&input) {
            Ok(name) => name.to_string(),
            Err(_) => input,
        };

        let filter = BankFilter::SubstringMatch(text.clone());
        let result = self.store.filter_by_bank_filter(&filter);
        self.show_query(result, &format!("Transactions for '{text}'"))
    }

    fn summary(&mut self, recent_limit: u32) -> io::Result<()> {
        let Summary {
            total_count,
            per_bank_counts,
            recent,
        } = match self.store.summary(recent_limit) {
            Ok(summary) => summary,
            Err(error) => return self.report_error(&error),
        };

        writeln!(self.output, "\n=== SUMMARY REPORT ===")?;
        writeln!(self.output, "Total Transactions: {total_count}")?;

        writeln!(self.output, "\n--- Transactions by Bank ---")?;
        for bank_count in &per_bank_counts {
            writeln!(
                self.output,
                "{}: {} transaction(s)",
                bank_count.bank, bank_count.count
            )?;
        }

        writeln!(
            self.output,
            "\n--- Recent Transactions (Last {recent_limit}) ---"
        )?;
        if recent.is_empty() {
            writeln!(self.output, "No transactions found.")
        } else {
            self.write_table(&recent)
        }
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    fn export(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== EXPORT TO CSV ===")?;
        let raw = self.prompt(&format!(
            "Enter filename (default: {DEFAULT_EXPORT_FILE_NAME}): "
        ))?;
        let path = export_path(&raw);

        let records = match self.store.get_all() {
            Ok(records) => records,
            Err(error) => return self.report_error(&error),
        };

        if records.is_empty() {
            return writeln!(self.output, "No records found to export.");
        }

        match export_records(&records, &path) {
            Ok(count) => writeln!(
                self.output,
                "Successfully exported {count} records to {}",
                path.display()
            ),
            Err(error) => self.report_error(&error),
        }
    }

    // ========================================================================
    // EDIT
    // ========================================================================

    fn edit_records(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== EDIT RECORD ===")?;

        loop {
            writeln!(self.output, "\nSearch for the record you want to edit:")?;
            writeln!(self.output, "1. Search by ID")?;
            writeln!(self.output, "2. Search by reference number")?;
            writeln!(self.output, "3. Show all records to select")?;
            writeln!(self.output, "0. Back to Main Menu")?;

            let selected = match self.prompt("\nSelect search option (0-3): ")?.as_str() {
                "0" => return Ok(()),
                "1" => self.select_by_id()?,
                "2" => self.select_by_reference()?,
                "3" => self.select_from_all()?,
                _ => {
                    writeln!(self.output, "Invalid option selected.")?;
                    continue;
                }
            };

            let Some(record) = selected else {
                if self.confirm("\nNo record selected. Try again? (y/n): ")? {
                    continue;
                }
                return Ok(());
            };

            writeln!(self.output, "\n=== CURRENT RECORD DETAILS ===")?;
            writeln!(self.output, "ID: {}", record.id)?;
            writeln!(self.output, "Reference Number: {}", record.reference)?;
            writeln!(self.output, "Bank Name: {}", record.bank)?;
            writeln!(self.output, "Date: {}", record.date)?;

            if !self.confirm("\nDo you want to edit this record? (y/n): ")? {
                continue;
            }

            self.edit_record(&record)?;

            if !self.confirm("\nEdit another record? (y/n): ")? {
                return Ok(());
            }
        }
    }

    /// Ask for new values, keeping the current value for blank or invalid
    /// input, then save after confirmation.
    fn edit_record(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.output, "\n=== EDIT FIELDS ===")?;
        writeln!(self.output, "Leave blank to keep current value")?;

        writeln!(self.output, "\nCurrent reference number: {}", record.reference)?;
        let raw = self.prompt("Enter new number (or press Enter to keep current): ")?;
        let reference = if raw.is_empty() {
            record.reference.clone()
        } else {
            match parse_reference_input(&raw) {
                Ok(reference) => {
                    writeln!(self.output, "New reference number: {reference}")?;
                    reference
                }
                Err(error) => {
                    tracing::warn!("keeping reference of record {}: {error}", record.id);
                    self.report_error(&error)?;
                    record.reference.clone()
                }
            }
        };

        writeln!(self.output, "\nCurrent bank: {}", record.bank)?;
        let codes = BankDirectory::codes().join(", ");
        writeln!(self.output, "Supported bank codes: {codes}")?;
        let raw = self.prompt("Enter new bank code/name (or press Enter to keep current): ")?;
        let bank = if raw.is_empty() {
            record.bank.clone()
        } else {
            self.resolve_bank_or_keep(&raw, &record.bank)?
        };

        writeln!(self.output, "\nCurrent date: {}", record.date)?;
        let raw = self.prompt("Enter new date (YYYY-MM-DD) or press Enter to keep current: ")?;
        let date = if raw.is_empty() {
            record.date
        } else {
            match parse_date(&raw, self.clock.today()) {
                Ok(date) => {
                    writeln!(self.output, "New date: {date}")?;
                    date
                }
                Err(error) => {
                    self.report_error(&error)?;
                    writeln!(self.output, "Keeping current date: {}", record.date)?;
                    record.date
                }
            }
        };

        writeln!(self.output, "\n=== SUMMARY OF CHANGES ===")?;
        writeln!(self.output, "ID: {} (unchanged)", record.id)?;
        writeln!(self.output, "Reference: {} -> {reference}", record.reference)?;
        writeln!(self.output, "Bank: {} -> {bank}", record.bank)?;
        writeln!(self.output, "Date: {} -> {date}", record.date)?;

        if !self.confirm("\nSave these changes? (y/n): ")? {
            return writeln!(self.output, "Changes cancelled.");
        }

        let fields = RecordFields::new(reference, bank, date);
        match self.store.update(record.id, &fields, self.clock.today()) {
            Ok(()) => writeln!(self.output, "\nRecord {} updated successfully!", record.id),
            Err(error) => self.report_error(&error),
        }
    }

    fn resolve_bank_or_keep(&mut self, raw: &str, current: &BankName) -> io::Result<BankName> {
        match resolve_bank_input(raw) {
            Ok(bank) => {
                writeln!(self.output, "New bank: {bank}")?;
                Ok(bank)
            }
            Err(_) => {
                writeln!(
                    self.output,
                    "Bank not recognized. Keeping current bank: {current}"
                )?;
                Ok(current.clone())
            }
        }
    }

    fn select_by_id(&mut self) -> io::Result<Option<Record>> {
        let raw = self.prompt("Enter record ID: ")?;
        let id = match parse_record_id(&raw) {
            Ok(id) => id,
            Err(error) => {
                self.report_error(&error)?;
                return Ok(None);
            }
        };

        match self.store.get_by_id(id) {
            Ok(Some(record)) => Ok(Some(record)),
            Ok(None) => {
                writeln!(self.output, "No record found with ID: {id}")?;
                Ok(None)
            }
            Err(error) => {
                self.report_error(&error)?;
                Ok(None)
            }
        }
    }

    fn select_by_reference(&mut self) -> io::Result<Option<Record>> {
        let raw = self.prompt("Enter reference number: ")?;

        let mut records = match self.store.get_by_reference_exact(&raw) {
            Ok(records) => records,
            Err(error) => {
                self.report_error(&error)?;
                return Ok(None);
            }
        };

        match records.len() {
            0 => {
                writeln!(self.output, "No record found with reference number: {raw}")?;
                Ok(None)
            }
            1 => Ok(records.pop()),
            _ => {
                writeln!(self.output, "\nMultiple records found with reference {raw}:")?;
                self.pick_one(records)
            }
        }
    }

    fn select_from_all(&mut self) -> io::Result<Option<Record>> {
        let records = match self.store.get_all() {
            Ok(records) => records,
            Err(error) => {
                self.report_error(&error)?;
                return Ok(None);
            }
        };

        if records.is_empty() {
            writeln!(self.output, "No records found in database.")?;
            return Ok(None);
        }

        writeln!(self.output, "\n=== ALL RECORDS ===")?;
        self.pick_one(records)
    }

    fn pick_one(&mut self, mut records: Vec<Record>) -> io::Result<Option<Record>> {
        for (i, record) in records.iter().enumerate() {
            writeln!(
                self.output,
                "{:<3} ID: {:<5} {:<12} {:<32} {}",
                i + 1,
                record.id,
                record.reference.as_ref(),
                record.bank.as_ref(),
                record.date
            )?;
        }

        let choice = self.prompt(&format!("\nSelect record (1-{}): ", records.len()))?;
        match choice.parse::<usize>() {
            Ok(n) if (1..=records.len()).contains(&n) => Ok(Some(records.swap_remove(n - 1))),
            _ => {
                writeln!(self.output, "Invalid selection.")?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;
    use time::{Date, Duration, macros::date};

    use crate::{record::DateInput, store::RecordStore};

    use super::Shell;

    const TODAY: Date = date!(2025 - 10 - 05);

    fn get_test_store() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("shell.db")).expect("Could not open store");
        (dir, store)
    }

    /// Run a session with `script` as the input and return the output.
    fn run_session(store: &RecordStore, script: &str) -> String {
        let mut output = Vec::new();
        {
            let mut shell = Shell::new(
                store.clone(),
                Box::new(TODAY),
                5,
                Cursor::new(script.to_owned()),
                &mut output,
            );
            shell.run().expect("Shell failed");
        }

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn exit_immediately() {
        let (_dir, store) = get_test_store();

        let output = run_session(&store, "0\n");

        assert!(output.contains("Thank you for using Transaction Management System!"));
    }

    #[test]
    fn end_of_input_exits() {
        let (_dir, store) = get_test_store();

        let output = run_session(&store, "1\n");

        assert!(output.contains("Enter a number"));
    }

    #[test]
    fn add_record_reprompts_until_valid() {
        let (_dir, store) = get_test_store();

        let output = run_session(&store, "1\nabc\n10000000\n453\nxyz\npcbl\nmaybe\ny\n0\n");

        assert!(output.contains("invalid reference number \"abc\""));
        assert!(output.contains("unknown bank code \"XYZ\""));
        assert!(output.contains("Please enter 'y' for yes or 'n' for no."));
        assert!(output.contains("Transaction saved successfully!"));
        let records = store.get_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference.as_ref(), "RK0000453");
        assert_eq!(records[0].bank.as_ref(), "PRIME COMMERCIAL BANK LTD");
        assert_eq!(records[0].date, TODAY);
    }

    #[test]
    fn add_duplicate_reports_error() {
        let (_dir, store) = get_test_store();
        store.add("453", "PCBL", &DateInput::Today, TODAY).unwrap();

        let output = run_session(&store, "1\n453\nGBBL\nn\n2025-10-01\n0\n");

        assert!(output.contains("reference number RK0000453 already exists"));
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn view_by_bank_code() {
        let (_dir, store) = get_test_store();
        store.add("453", "PCBL", &DateInput::Today, TODAY).unwrap();
        store.add("454", "GBBL", &DateInput::Today, TODAY).unwrap();

        let output = run_session(&store, "2\n3\npcbl\n0\n0\n");

        assert!(output.contains("RK0000453"));
        assert!(!output.contains("RK0000454"));
        assert!(output.contains("Total records: 1"));
    }

    #[test]
    fn view_by_future_date_is_rejected() {
        let (_dir, store) = get_test_store();

        let output = run_session(&store, "2\n4\n2999-01-01\n0\n0\n");

        assert!(output.contains("invalid date \"2999-01-01\""));
    }

    #[test]
    fn edit_keeps_current_values_for_invalid_input() {
        let (_dir, store) = get_test_store();
        let id = store.add("453", "PCBL", &DateInput::Today, TODAY).unwrap();

        let script = format!("3\n1\n{id}\ny\n99999999\nacme\n2999-01-01\ny\nn\n0\n");
        let output = run_session(&store, &script);

        assert!(output.contains("Bank not recognized. Keeping current bank"));
        assert!(output.contains("Keeping current date: 2025-10-05"));
        let record = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.reference.as_ref(), "RK0000453");
        assert_eq!(record.bank.as_ref(), "PRIME COMMERCIAL BANK LTD");
        assert_eq!(record.date, TODAY);
    }

    #[test]
    fn edit_by_reference_updates_fields() {
        let (_dir, store) = get_test_store();
        let id = store.add("453", "PCBL", &DateInput::Today, TODAY).unwrap();

        let script = "3\n2\nrk0000453\ny\n12\nshangrila\n2025-01-02\ny\nn\n0\n";
        let output = run_session(&store, script);

        assert!(output.contains("Record 1 updated successfully!"));
        let record = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.reference.as_ref(), "RK0000012");
        assert_eq!(record.bank.as_ref(), "SHANGRILA DEVELOPMENT BANK LTD");
        assert_eq!(record.date, date!(2025 - 01 - 02));
    }

    #[test]
    fn summary_of_empty_store() {
        let (_dir, store) = get_test_store();

        let output = run_session(&store, "4\n4\n0\n0\n");

        assert!(output.contains("Total Transactions: 0"));
        assert!(output.contains("No transactions found."));
    }

    #[test]
    fn bank_report_expands_code_and_matches_name() {
        let (_dir, store) = get_test_store();
        store.add("453", "PCBL", &DateInput::Today, TODAY).unwrap();
        store.add("454", "GBBL", &DateInput::Today, TODAY).unwrap();

        let output = run_session(&store, "4\n2\npcbl\n0\n0\n");

        assert!(output.contains("TRANSACTIONS FOR 'PRIME COMMERCIAL BANK LTD'"));
        assert!(output.contains("RK0000453"));
        assert!(!output.contains("RK0000454"));
        assert!(output.contains("Total records: 1"));
    }

    #[test]
    fn reversed_date_range_report_finds_nothing() {
        let (_dir, store) = get_test_store();
        store
            .add("453", "PCBL", &DateInput::Raw("2025-10-02".to_owned()), TODAY)
            .unwrap();

        let output = run_session(&store, "4\n1\n2025-10-03\n2025-10-01\n0\n0\n");

        assert!(output.contains("No transactions from 2025-10-03 to 2025-10-01 found."));
        assert!(!output.contains("RK0000453"));
    }

    #[test]
    fn reference_report_ignores_case() {
        let (_dir, store) = get_test_store();
        store.add("453", "PCBL", &DateInput::Today, TODAY).unwrap();
        store.add("4530", "PCBL", &DateInput::Today, TODAY).unwrap();

        let output = run_session(&store, "4\n3\nrk0000453\n0\n0\n");

        assert!(output.contains("TRANSACTION DETAILS FOR 'RK0000453'"));
        assert!(output.contains("RK0000453"));
        assert!(!output.contains("RK0004530"));
        assert!(output.contains("Total records: 1"));
    }

    #[test]
    fn latest_records_shows_ten_newest() {
        let (_dir, store) = get_test_store();
        for days_ago in 0..12 {
            let number = (101 + days_ago).to_string();
            let date = (TODAY - Duration::days(days_ago)).to_string();
            store
                .add(&number, "EPF", &DateInput::Raw(date), TODAY)
                .unwrap();
        }

        let output = run_session(&store, "6\n0\n");

        assert!(output.contains("Total Transactions: 12"));
        assert!(output.contains("Recent Transactions (Last 10)"));
        let rows: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("RK0000"))
            .collect();
        assert_eq!(rows.len(), 10);
        assert!(rows[0].contains("RK0000101"));
        assert!(rows[9].contains("RK0000110"));
        assert!(!output.contains("RK0000111"));
        assert!(!output.contains("RK0000112"));
    }

    #[test]
    fn export_writes_file() {
        let (dir, store) = get_test_store();
        store.add("453", "PCBL", &DateInput::Today, TODAY).unwrap();
        let target = dir.path().join("backup");

        let script = format!("5\n{}\n0\n", target.display());
        let output = run_session(&store, &script);

        assert!(output.contains("Successfully exported 1 records"));
        assert!(dir.path().join("backup.csv").is_file());
    }
}
