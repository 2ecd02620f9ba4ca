//! Table inspection commands.

use super::{load_table, Location};
use crate::{
    config::AppConfig, options::DisplayOptions, paging::PageState, source::column_names,
};

/// Print column names, one per line, in schema order.
pub(crate) async fn cmd_columns(config: &AppConfig, location: Option<&str>) -> crate::Result<()> {
    let location = Location::resolve(config, location)?;
    let table = load_table(config, &location).await?;

    for name in column_names(&table) {
        println!("{}", name);
    }
    Ok(())
}

/// Print row and column page counts.
pub(crate) async fn cmd_pages(
    config: &AppConfig,
    location: Option<&str>,
    rows: Option<usize>,
    cols: Option<usize>,
) -> crate::Result<()> {
    let options = page_sizes(config, rows, cols)?;
    let location = Location::resolve(config, location)?;
    let table = load_table(config, &location).await?;

    let row_pages = PageState::new(table.num_rows(), options.row_page_size);
    println!("Rows: {}", table.num_rows());
    println!("Columns: {}", table.num_columns());
    println!(
        "Row pages: {} ({} per page)",
        row_pages.page_count(),
        row_pages.page_size()
    );

    if let Some(cols) = options.col_page_size {
        let col_pages = PageState::new(table.num_columns(), cols);
        println!(
            "Column pages: {} ({} per page)",
            col_pages.page_count(),
            col_pages.page_size()
        );
    }
    Ok(())
}

/// Page sizes from the config, overridden by flags, validated like `render`'s.
fn page_sizes(
    config: &AppConfig,
    rows: Option<usize>,
    cols: Option<usize>,
) -> crate::Result<DisplayOptions> {
    let mut options = config.display_options();
    if let Some(rows) = rows {
        options.row_page_size = rows;
    }
    options.col_page_size = cols;
    options.validate()?;
    Ok(options)
}
