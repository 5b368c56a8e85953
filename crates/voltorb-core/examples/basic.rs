//! Basic example of using the Voltorb Flip deduction engine

use voltorb_core::{Hints, Solver, Value};

fn print_board(solver: &Solver) {
    for row in 0..solver.row_count() {
        for column in 0..solver.column_count() {
            let mark = if solver.is_user_confirmed(column, row) {
                '*'
            } else if solver.is_confirmed(column, row) {
                '!'
            } else {
                ' '
            };
            print!("[{}{}] ", solver.cell(column, row), mark);
        }
        println!();
    }
    println!();
}

fn main() {
    // A 5x5 board with the classic reference targets.
    println!("Building a 5x5 board...\n");
    let mut solver = Solver::new(5, 5).expect("5x5 is within bounds");

    let hints = Hints::new(
        vec![4, 4, 7, 4, 5], // column point-sums
        vec![5, 5, 4, 3, 7], // row point-sums
        vec![1, 2, 1, 1, 2], // column volt-counts
        vec![1, 2, 2, 2, 0], // row volt-counts
    );

    match solver.set_hints(&hints) {
        Ok(true) => println!("Hints installed; initial deductions:"),
        Ok(false) => {
            println!("These hints admit no solution at all.");
            return;
        }
        Err(err) => {
            println!("Hints rejected: {}", err);
            return;
        }
    }
    print_board(&solver);

    // Flip a few tiles and feed the revealed values back in.
    println!("Revealing row 4 as [1, 2, 1, 1, 2]...\n");
    for (column, value) in [
        (0, Value::One),
        (1, Value::Two),
        (2, Value::One),
        (3, Value::One),
        (4, Value::Two),
    ] {
        if let Err(err) = solver.set_cell(column, 4, value) {
            println!("Board became unsatisfiable: {}", err);
            return;
        }
    }
    print_board(&solver);

    // Take one reveal back; everything derived from it is re-derived.
    println!("Unsetting (4, 4) again...\n");
    solver
        .unset_cell(4, 4)
        .expect("retracting a reveal cannot make the board unsatisfiable");
    print_board(&solver);

    // A deliberately wrong reveal: row 4 has no volts, so claiming one
    // triggers the rollback and the cell comes back without the volt.
    println!("Claiming (0, 4) is a volt (it cannot be)...\n");
    match solver.set_cell(0, 4, Value::Volt) {
        Ok(mask) => println!(
            "Rolled back; (0, 4) is now {} and user-confirmed: {}",
            mask,
            solver.is_user_confirmed(0, 4)
        ),
        Err(err) => println!("Board became unsatisfiable: {}", err),
    }
}
