//! Menu loop driving inventory operations from a line-oriented console.
//!
//! # Responsibility
//! - Render the numbered menu and dispatch each choice to one service call.
//! - Turn service outcomes into operator-facing messages.
//!
//! # Invariants
//! - A failed operation prints a diagnostic and returns to the menu.
//! - Only choice `9` or closed input leave the loop.
//! - Bill input collection finishes before the bill is computed.

use crate::prompt::{ConsoleError, ConsoleResult, Prompter};
use invtrack_core::{BillRequest, InventoryRepository, InventoryService, RepoError, SortKey};
use log::{debug, info, warn};
use std::io::{BufRead, Write};

const NOT_FOUND: &str = "Item not found in inventory.";
const BILL_DONE_TOKEN: &str = "done";

/// Menu entries, numbered as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddItem,
    ViewInventory,
    UpdateQuantity,
    SearchItem,
    DeleteItem,
    TotalCost,
    GenerateBill,
    SortInventory,
    Exit,
}

impl MenuChoice {
    pub fn from_number(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::AddItem),
            2 => Some(Self::ViewInventory),
            3 => Some(Self::UpdateQuantity),
            4 => Some(Self::SearchItem),
            5 => Some(Self::DeleteItem),
            6 => Some(Self::TotalCost),
            7 => Some(Self::GenerateBill),
            8 => Some(Self::SortInventory),
            9 => Some(Self::Exit),
            _ => None,
        }
    }

    fn action_name(self) -> &'static str {
        match self {
            Self::AddItem => "add",
            Self::ViewInventory => "view",
            Self::UpdateQuantity => "update_quantity",
            Self::SearchItem => "search",
            Self::DeleteItem => "delete",
            Self::TotalCost => "total_cost",
            Self::GenerateBill => "bill",
            Self::SortInventory => "sort",
            Self::Exit => "exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    MenuPrompt,
    AwaitingChoice,
    ExecutingAction(MenuChoice),
    Exit,
}

pub struct ConsoleController<'svc, Repo: InventoryRepository, R, W> {
    service: &'svc InventoryService<Repo>,
    io: Prompter<R, W>,
}

impl<'svc, Repo, R, W> ConsoleController<'svc, Repo, R, W>
where
    Repo: InventoryRepository,
    R: BufRead,
    W: Write,
{
    pub fn new(service: &'svc InventoryService<Repo>, input: R, output: W) -> Self {
        Self {
            service,
            io: Prompter::new(input, output),
        }
    }

    /// Runs the menu loop until the operator exits or input closes.
    ///
    /// # Errors
    /// Only console write/read failures escape; inventory failures are
    /// reported inline.
    pub fn run(&mut self) -> ConsoleResult<()> {
        info!("event=session_start module=cli status=ok");
        let mut state = ConsoleState::MenuPrompt;
        loop {
            state = match self.step(state) {
                Ok(next) => next,
                Err(ConsoleError::EndOfInput) => {
                    debug!("event=input_closed module=cli status=ok");
                    ConsoleState::Exit
                }
                Err(err) => return Err(err),
            };

            if state == ConsoleState::Exit {
                info!("event=session_end module=cli status=ok");
                return Ok(());
            }
        }
    }

    fn step(&mut self, state: ConsoleState) -> ConsoleResult<ConsoleState> {
        match state {
            ConsoleState::MenuPrompt => {
                self.print_menu()?;
                Ok(ConsoleState::AwaitingChoice)
            }
            ConsoleState::AwaitingChoice => {
                let value: i64 = self.io.read_number()?;
                match MenuChoice::from_number(value) {
                    Some(choice) => Ok(ConsoleState::ExecutingAction(choice)),
                    None => {
                        self.io.say("Invalid choice! Please try again.")?;
                        Ok(ConsoleState::MenuPrompt)
                    }
                }
            }
            ConsoleState::ExecutingAction(choice) => self.execute(choice),
            ConsoleState::Exit => Ok(ConsoleState::Exit),
        }
    }

    fn execute(&mut self, choice: MenuChoice) -> ConsoleResult<ConsoleState> {
        debug!(
            "event=menu_action module=cli status=start action={}",
            choice.action_name()
        );
        match choice {
            MenuChoice::AddItem => self.add_item()?,
            MenuChoice::ViewInventory => self.view_inventory()?,
            MenuChoice::UpdateQuantity => self.update_quantity()?,
            MenuChoice::SearchItem => self.search_item()?,
            MenuChoice::DeleteItem => self.delete_item()?,
            MenuChoice::TotalCost => self.total_cost()?,
            MenuChoice::GenerateBill => self.generate_bill()?,
            MenuChoice::SortInventory => self.sort_inventory()?,
            MenuChoice::Exit => {
                self.io.say("Exiting Inventory Management System...")?;
                return Ok(ConsoleState::Exit);
            }
        }
        Ok(ConsoleState::MenuPrompt)
    }

    fn print_menu(&mut self) -> ConsoleResult<()> {
        self.io.say("\n--- Inventory Management Menu ---")?;
        self.io.say("1. Add Item")?;
        self.io.say("2. View Inventory")?;
        self.io.say("3. Update Quantity")?;
        self.io.say("4. Search Item")?;
        self.io.say("5. Delete Item")?;
        self.io.say("6. View Total Inventory Cost")?;
        self.io.say("7. Generate Bill")?;
        self.io.say("8. Sorting")?;
        self.io.say("9. Exit")?;
        self.io.ask("Enter your choice (1-9): ")
    }

    fn add_item(&mut self) -> ConsoleResult<()> {
        let name = self.io.prompt_text("Enter Item Name: ")?;
        let quantity: u32 = self.io.prompt_number("Enter Quantity: ")?;
        let cost = self.io.prompt_cost("Enter Cost: ")?;

        match self.service.add_item(name, quantity, cost) {
            Ok(()) => self.io.say("Item added to inventory."),
            Err(err) => self.report_failure(MenuChoice::AddItem, &err),
        }
    }

    fn view_inventory(&mut self) -> ConsoleResult<()> {
        self.io.say("\n--- Inventory ---")?;
        match self.service.all_items() {
            Ok(items) if items.is_empty() => self.io.say("Inventory is empty."),
            Ok(items) => {
                for item in &items {
                    self.io.say(item)?;
                }
                Ok(())
            }
            Err(err) => self.report_failure(MenuChoice::ViewInventory, &err),
        }
    }

    fn update_quantity(&mut self) -> ConsoleResult<()> {
        let name = self.io.prompt_text("Enter Item Name to Update Quantity: ")?;
        let quantity: u32 = self.io.prompt_number("Enter New Quantity: ")?;

        match self.service.update_quantity(&name, quantity) {
            Ok(_) => self.io.say("Quantity updated successfully!"),
            Err(err) => self.report_failure(MenuChoice::UpdateQuantity, &err),
        }
    }

    fn search_item(&mut self) -> ConsoleResult<()> {
        let name = self.io.prompt_text("Enter Item Name to Search: ")?;

        match self.service.item_cost(&name) {
            Ok(Some(cost)) => self.io.say(format!("Item: {name}, Cost: {cost}")),
            Ok(None) => self.io.say(NOT_FOUND),
            Err(err) => self.report_failure(MenuChoice::SearchItem, &err),
        }
    }

    fn delete_item(&mut self) -> ConsoleResult<()> {
        let name = self.io.prompt_text("Enter Item Name to Delete: ")?;

        match self.service.delete_item(&name) {
            Ok(_) => self.io.say("Item deleted from inventory."),
            Err(err) => self.report_failure(MenuChoice::DeleteItem, &err),
        }
    }

    fn total_cost(&mut self) -> ConsoleResult<()> {
        match self.service.total_inventory_cost() {
            Ok(total) => self.io.say(format!("Total Inventory Cost: {total:.2}")),
            Err(err) => self.report_failure(MenuChoice::TotalCost, &err),
        }
    }

    fn generate_bill(&mut self) -> ConsoleResult<()> {
        self.io.say("\n--- Generate Bill ---")?;
        let requests = self.collect_bill_requests()?;

        if requests.is_empty() {
            return self.io.say("No items selected for the bill.");
        }

        match self.service.generate_bill(&requests) {
            Ok(bill) => self.io.say(format!("\n{bill}")),
            Err(err) => self.report_failure(MenuChoice::GenerateBill, &err),
        }
    }

    /// Gathers `(name, quantity)` pairs until the done token.
    ///
    /// Names without a stored cost are rejected before asking for a quantity.
    fn collect_bill_requests(&mut self) -> ConsoleResult<Vec<BillRequest>> {
        let mut requests = Vec::new();
        loop {
            let name = self
                .io
                .prompt_text("Enter Item Name to add to bill (or 'done' to finish): ")?;
            if name.eq_ignore_ascii_case(BILL_DONE_TOKEN) {
                return Ok(requests);
            }

            match self.service.item_cost(&name) {
                Ok(Some(_)) => {
                    let quantity: u32 = self.io.prompt_number("Enter Quantity: ")?;
                    requests.push(BillRequest::new(name, quantity));
                }
                Ok(None) => self.io.say(NOT_FOUND)?,
                Err(err) => self.report_failure(MenuChoice::GenerateBill, &err)?,
            }
        }
    }

    fn sort_inventory(&mut self) -> ConsoleResult<()> {
        self.io.say("\n--- Sort Inventory ---")?;
        self.io.say("1. Sort by Quantity")?;
        self.io.say("2. Sort by Name")?;
        self.io.say("3. Sort by Cost")?;
        let value: i64 = self.io.prompt_number("Enter your choice (1-3): ")?;

        let key = match value {
            1 => SortKey::Quantity,
            2 => SortKey::Name,
            3 => SortKey::Cost,
            _ => return self.io.say("Invalid choice! Sorting cancelled."),
        };

        match self.service.sorted_inventory_by_key(key) {
            Ok(items) => {
                self.io.say("\n--- Sorted Inventory ---")?;
                for item in &items {
                    self.io.say(item)?;
                }
                Ok(())
            }
            Err(err) => self.report_failure(MenuChoice::SortInventory, &err),
        }
    }

    fn report_failure(&mut self, choice: MenuChoice, err: &RepoError) -> ConsoleResult<()> {
        if let RepoError::NotFound(_) = err {
            return self.io.say(NOT_FOUND);
        }

        warn!(
            "event=menu_action module=cli status=error action={} error_code={}",
            choice.action_name(),
            err.code()
        );
        self.io.say(format!("Error: {err}"))
    }
}
