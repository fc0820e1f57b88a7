//! Interactive Shell - menu-driven console loop over an `Inventory`
//!
//! Generic over the input and output streams so the whole loop can be driven
//! from tests. The shell borrows the inventory; closing it is the caller's job.

pub mod input;

use std::io::{BufRead, Write};
use std::str::FromStr;
use crate::inventory::Inventory;
use crate::item::Item;
use crate::{Error, Result};
use input::{InputError, parse_decimal, parse_int};

const MENU_TITLE: &str = "--- MENÚ INVENTARIO ---";
const CHOICE_PROMPT: &str = "Seleccione una opción: ";
const BAD_INT: &str = "Por favor ingrese un número entero válido.";
const BAD_DECIMAL: &str = "Por favor ingrese un número decimal válido.";

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    UpdateQuantity,
    UpdatePrice,
    Search,
    List,
    Get,
    Exit,
}

impl MenuChoice {
    /// All choices in menu order
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::Add,
            MenuChoice::Remove,
            MenuChoice::UpdateQuantity,
            MenuChoice::UpdatePrice,
            MenuChoice::Search,
            MenuChoice::List,
            MenuChoice::Get,
            MenuChoice::Exit,
        ]
    }

    /// Key typed to select this choice
    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::Add => "1",
            MenuChoice::Remove => "2",
            MenuChoice::UpdateQuantity => "3",
            MenuChoice::UpdatePrice => "4",
            MenuChoice::Search => "5",
            MenuChoice::List => "6",
            MenuChoice::Get => "7",
            MenuChoice::Exit => "0",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Añadir producto",
            MenuChoice::Remove => "Eliminar producto por ID",
            MenuChoice::UpdateQuantity => "Actualizar cantidad",
            MenuChoice::UpdatePrice => "Actualizar precio",
            MenuChoice::Search => "Buscar productos por nombre",
            MenuChoice::List => "Mostrar todos los productos",
            MenuChoice::Get => "Mostrar producto por ID",
            MenuChoice::Exit => "Salir",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        MenuChoice::all()
            .iter()
            .copied()
            .find(|choice| choice.key() == key)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown menu option: {}", key)))
    }
}

/// Whether the loop keeps going after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Console session bound to one inventory
pub struct Shell<'a, R, W> {
    inventory: &'a mut Inventory,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(inventory: &'a mut Inventory, input: R, output: W) -> Self {
        Self { inventory, input, output }
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line(CHOICE_PROMPT)? else {
                break;
            };

            let step = match line.parse::<MenuChoice>() {
                Ok(choice) => self.handle(choice)?,
                Err(_) => {
                    writeln!(self.output, "Opción inválida. Intente de nuevo.")?;
                    Step::Continue
                }
            };

            if step == Step::Exit {
                break;
            }
        }

        writeln!(self.output, "Saliendo...")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", MENU_TITLE)?;
        for choice in MenuChoice::all() {
            writeln!(self.output, "{}. {}", choice.key(), choice.label())?;
        }
        Ok(())
    }

    fn handle(&mut self, choice: MenuChoice) -> Result<Step> {
        tracing::debug!("Menu choice: {:?}", choice);
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::Remove => self.remove(),
            MenuChoice::UpdateQuantity => self.update_quantity(),
            MenuChoice::UpdatePrice => self.update_price(),
            MenuChoice::Search => self.search(),
            MenuChoice::List => self.list(),
            MenuChoice::Get => self.get(),
            MenuChoice::Exit => Ok(Step::Exit),
        }
    }

    fn add(&mut self) -> Result<Step> {
        let Some(id) = self.prompt_int("ID (entero único): ")? else {
            return Ok(Step::Exit);
        };
        let Some(name) = self.read_line("Nombre: ")? else {
            return Ok(Step::Exit);
        };
        let Some(quantity) = self.prompt_int("Cantidad: ")? else {
            return Ok(Step::Exit);
        };
        let Some(price) = self.prompt_decimal("Precio: ")? else {
            return Ok(Step::Exit);
        };

        if self.inventory.add(Item::new(id, name, quantity, price))? {
            writeln!(self.output, "Producto añadido correctamente.")?;
        } else {
            writeln!(self.output, "Error: ya existe un producto con ese ID.")?;
        }
        Ok(Step::Continue)
    }

    fn remove(&mut self) -> Result<Step> {
        let Some(id) = self.prompt_int("ID del producto a eliminar: ")? else {
            return Ok(Step::Exit);
        };

        if self.inventory.remove_by_id(id)? {
            writeln!(self.output, "Producto eliminado.")?;
        } else {
            writeln!(self.output, "No existe producto con ese ID.")?;
        }
        Ok(Step::Continue)
    }

    fn update_quantity(&mut self) -> Result<Step> {
        let Some(id) = self.prompt_int("ID del producto a actualizar cantidad: ")? else {
            return Ok(Step::Exit);
        };
        let Some(quantity) = self.prompt_int("Nueva cantidad: ")? else {
            return Ok(Step::Exit);
        };

        let msg = if self.inventory.update_quantity(id, quantity)? {
            "Cantidad actualizada."
        } else {
            "Producto no encontrado."
        };
        writeln!(self.output, "{}", msg)?;
        Ok(Step::Continue)
    }

    fn update_price(&mut self) -> Result<Step> {
        let Some(id) = self.prompt_int("ID del producto a actualizar precio: ")? else {
            return Ok(Step::Exit);
        };
        let Some(price) = self.prompt_decimal("Nuevo precio: ")? else {
            return Ok(Step::Exit);
        };

        let msg = if self.inventory.update_price(id, price)? {
            "Precio actualizado."
        } else {
            "Producto no encontrado."
        };
        writeln!(self.output, "{}", msg)?;
        Ok(Step::Continue)
    }

    fn search(&mut self) -> Result<Step> {
        let Some(text) = self.read_line("Ingrese texto a buscar en el nombre: ")? else {
            return Ok(Step::Exit);
        };

        let results = self.inventory.search_by_name(&text);
        if results.is_empty() {
            writeln!(self.output, "No se encontraron productos.")?;
        } else {
            writeln!(self.output, "Se encontraron {} producto(s):", results.len())?;
            for item in results {
                writeln!(self.output, "{}", item)?;
            }
        }
        Ok(Step::Continue)
    }

    fn list(&mut self) -> Result<Step> {
        let items = self.inventory.list_all();
        if items.is_empty() {
            writeln!(self.output, "Inventario vacío.")?;
        } else {
            writeln!(self.output, "Total productos: {}", items.len())?;
            for item in items {
                writeln!(self.output, "{}", item)?;
            }
        }
        Ok(Step::Continue)
    }

    fn get(&mut self) -> Result<Step> {
        let Some(id) = self.prompt_int("ID del producto: ")? else {
            return Ok(Step::Exit);
        };

        match self.inventory.get_by_id(id) {
            Some(item) => writeln!(self.output, "{}", item)?,
            None => writeln!(self.output, "Producto no encontrado.")?,
        }
        Ok(Step::Continue)
    }

    // ========== Prompting ==========

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-prompt until `parse` accepts the line. `None` at end of input.
    fn prompt_parsed<T>(
        &mut self,
        prompt: &str,
        parse: fn(&str) -> std::result::Result<T, InputError>,
        retry_msg: &str,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    tracing::debug!("Rejected input: {}", e);
                    writeln!(self.output, "{}", retry_msg)?;
                }
            }
        }
    }

    fn prompt_int(&mut self, prompt: &str) -> Result<Option<i64>> {
        self.prompt_parsed(prompt, parse_int, BAD_INT)
    }

    fn prompt_decimal(&mut self, prompt: &str) -> Result<Option<f64>> {
        self.prompt_parsed(prompt, parse_decimal, BAD_DECIMAL)
    }
}
