/// Command summary printed by `help` in the interactive session.
pub const HELP: &str = "\
Commandes :
  <champ> <valeur>          saisir une valeur (achat, loyer, charges, rendement)
  set <champ> <valeur>      idem
  clear <champ>             vider un champ
  period <champ> <période>  basculer loyer/charges en mensuel ou annuel
  toggle <champ>            inverser la période de loyer/charges
  reset                     tout effacer, périodes remises en mensuel
  show                      réafficher le tableau
  help                      cette aide
  quit                      quitter
";
