mod checkout_branch_restores_its_tip;
