use minegrid_core::GameConfig;

/// The new-game form as typed by the player. Values are signed so that nonsense such as a
/// negative row count reaches validation instead of failing to parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NewGameForm {
    pub rows: i64,
    pub columns: i64,
    pub mines: i64,
}

impl NewGameForm {
    /// One message per invalid field, in form order.
    pub fn validate(&self) -> Result<GameConfig, Vec<&'static str>> {
        let mut errors = Vec::new();

        if self.rows <= 0 {
            errors.push("Need to have at least 1 row");
        }
        if self.columns <= 0 {
            errors.push("Need to be at least 1 column");
        }
        if self.mines <= 0 {
            errors.push("Need to have at least 1 mine in the game");
        } else if self.mines >= self.rows.saturating_mul(self.columns) {
            errors.push("Mines need to be less than the total number of cells");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let (Ok(rows), Ok(columns), Ok(mines)) = (
            usize::try_from(self.rows),
            usize::try_from(self.columns),
            usize::try_from(self.mines),
        ) else {
            return Err(vec!["Grid is too large"]);
        };
        GameConfig::new(rows, columns, mines).map_err(|_| vec!["Grid is too large"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(rows: i64, columns: i64, mines: i64) -> NewGameForm {
        NewGameForm {
            rows,
            columns,
            mines,
        }
    }

    #[test]
    fn accepts_valid_form() {
        assert_eq!(
            form(9, 9, 10).validate(),
            Ok(GameConfig::new(9, 9, 10).unwrap())
        );
    }

    #[test]
    fn reports_every_bad_field() {
        assert_eq!(
            form(0, -3, 0).validate(),
            Err(vec![
                "Need to have at least 1 row",
                "Need to be at least 1 column",
                "Need to have at least 1 mine in the game",
            ])
        );
    }

    #[test]
    fn mines_must_leave_a_safe_cell() {
        assert_eq!(
            form(2, 2, 4).validate(),
            Err(vec!["Mines need to be less than the total number of cells"])
        );
        assert!(form(2, 2, 3).validate().is_ok());
    }
}
